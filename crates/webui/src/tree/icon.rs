//! Icon component using Unicode characters/emoji.

use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    #[default]
    Blank,
    CodeFile,
    Document,
    FolderClose,
    FolderOpen,
    Loading,
}

impl Icon {
    #[must_use]
    pub fn as_char(self) -> &'static str {
        match self {
            Icon::Blank => " ",
            Icon::CodeFile => "⌨",
            Icon::Document => "📄",
            Icon::FolderClose => "📁",
            Icon::FolderOpen => "📂",
            Icon::Loading => "⏳",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct IconProps {
    pub icon: Icon,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(IconView)]
pub fn icon_view(props: &IconProps) -> Html {
    let mut classes = props.class.clone();
    classes.push("tree-icon");
    html! {
        <span class={classes} aria-hidden="true">
            { props.icon.as_char() }
        </span>
    }
}

impl yew::ToHtml for Icon {
    fn to_html(&self) -> Html {
        html! { <IconView icon={*self} /> }
    }
}
