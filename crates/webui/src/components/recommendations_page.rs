use crate::{
    api::model::{ChangeRange, ImpactLevel, RepositoryId, TestCaseRecommendation},
    app::use_api,
    components::{commit_range_form::CommitRangeForm, revision::use_request_guard},
};
use log::debug;
use std::ops::Deref;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Counts per impact level, highest first.
fn impact_summary(recommendations: &[TestCaseRecommendation]) -> Vec<(ImpactLevel, usize)> {
    [ImpactLevel::High, ImpactLevel::Medium, ImpactLevel::Low]
        .into_iter()
        .map(|level| {
            let count = recommendations
                .iter()
                .filter(|recommendation| recommendation.impact_level == Some(level))
                .count();
            (level, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[function_component(RecommendationsPage)]
pub fn recommendations_page() -> Html {
    let api = use_api();
    let busy_state = use_state(|| false);
    let recommendations_state = use_state(|| None::<(ChangeRange, Vec<TestCaseRecommendation>)>);
    let recommend_guard = use_request_guard();

    let on_recommend = {
        let busy_state = busy_state.clone();
        let recommendations_state = recommendations_state.clone();
        let recommend_guard = recommend_guard.clone();
        Callback::from(move |range: ChangeRange| {
            let ticket = recommend_guard.begin();
            let api = api.clone();
            let busy_state = busy_state.clone();
            let recommendations_state = recommendations_state.clone();
            busy_state.set(true);
            spawn_local(async move {
                let result = api.recommend_test_cases(&range).await;
                if !ticket.is_current() {
                    return;
                }
                busy_state.set(false);
                if let Ok(recommendations) = result {
                    debug!(
                        "{} recommendations for {}..{}",
                        recommendations.len(),
                        range.from_commit,
                        range.to_commit
                    );
                    recommendations_state.set(Some((range, recommendations)));
                }
            });
        })
    };

    let on_repository_change = {
        let recommendations_state = recommendations_state.clone();
        let busy_state = busy_state.clone();
        Callback::from(move |_: Option<RepositoryId>| {
            recommend_guard.invalidate();
            recommendations_state.set(None);
            busy_state.set(false);
        })
    };

    let results = match recommendations_state.deref() {
        None => html! {},
        Some((_, recommendations)) if recommendations.is_empty() => {
            html! { <p class="empty">{"No test case is affected by this range."}</p> }
        }
        Some((range, recommendations)) => {
            let summary = impact_summary(recommendations)
                .into_iter()
                .map(|(level, count)| {
                    html! {
                        <span class={classes!("badge", level.css_class())}>
                            { format!("{level}: {count}") }
                        </span>
                    }
                })
                .collect::<Html>();
            html! {
                <section class="recommendation-results">
                    <h4>{ format!("Recommended for {}..{}", range.from_commit, range.to_commit) }</h4>
                    <p class="summary">{ summary }</p>
                    <table class="recommendation_list">
                        <thead>
                            <tr>
                                <th>{"Test case"}</th>
                                <th>{"Method"}</th>
                                <th class="number">{"Score"}</th>
                                <th>{"Impact"}</th>
                                <th>{"Reasons"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for recommendations.iter().enumerate().map(|(idx, recommendation)| render_row(idx, recommendation)) }
                        </tbody>
                    </table>
                </section>
            }
        }
    };

    html! {
        <>
            <h3>{"Test Case Recommendations"}</h3>

            <CommitRangeForm
                onsubmit={on_recommend}
                submit_label="Recommend"
                busy={*busy_state}
                onrepositorychange={on_repository_change}
            />

            { results }
        </>
    }
}

fn render_row(idx: usize, recommendation: &TestCaseRecommendation) -> Html {
    let test_case = &recommendation.test_case;
    let key = test_case
        .id
        .map_or_else(|| idx.to_string(), |id| id.to_string());
    let score = recommendation.score_percent();
    let reasons = recommendation
        .reasons()
        .into_iter()
        .map(|reason| html! { <li>{ reason }</li> })
        .collect::<Html>();

    html! {
        <tr {key}>
            <td title={test_case.case_description.clone().unwrap_or_default()}>
                { &test_case.case_name }
            </td>
            <td class="method">{ test_case.qualified_method().unwrap_or_default() }</td>
            <td class="number">
                if let Some(score) = score {
                    <>
                        <div class="score-bar">
                            <div class="score-fill" style={format!("width: {score}%")}></div>
                        </div>
                        { format!("{score}%") }
                    </>
                } else {
                    {"-"}
                }
            </td>
            <td>
                if let Some(level) = recommendation.impact_level {
                    <span class={classes!("badge", level.css_class())}>{ level.to_string() }</span>
                }
            </td>
            <td><ul class="reasons">{ reasons }</ul></td>
        </tr>
    }
}
