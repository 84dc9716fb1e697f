//! Unified notification system for displaying success, error, and info messages.
//!
//! Failed API calls land here through the [`Notifier`] impl. Views push their
//! own messages:
//! ```ignore
//! let notifications = use_context::<NotificationContext>().unwrap();
//! notifications.push(Notification::success("Operation completed"));
//! notifications.push(Notification::error("Something went wrong"));
//! ```

use crate::api::Notifier;
use gloo::timers::callback::Timeout;
use std::{cell::Cell, rc::Rc};
use yew::prelude::*;

/// Default time in milliseconds before a notification auto-dismisses
const AUTO_DISMISS_MS: u32 = 5000;
/// Duration of the fade-out animation
const FADE_OUT_MS: u32 = 300;

/// Unique identifier for notifications
type NotificationId = u32;

/// Notification severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl NotificationLevel {
    fn css_class(self) -> &'static str {
        match self {
            NotificationLevel::Info => "notification-info",
            NotificationLevel::Success => "notification-success",
            NotificationLevel::Error => "notification-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✕",
        }
    }
}

/// A notification to display to the user
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    id: NotificationId,
    pub level: NotificationLevel,
    pub message: String,
    /// Whether the notification is fading out (for animation)
    fading_out: bool,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(NotificationLevel::Error, message)
    }
}

pub struct NotificationBuilder {
    level: NotificationLevel,
    message: String,
}

impl NotificationBuilder {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    fn build(self, id: NotificationId) -> Notification {
        Notification {
            id,
            level: self.level,
            message: self.message,
            fading_out: false,
        }
    }
}

/// Notifications currently on screen, oldest first.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NotificationList {
    notifications: Vec<Notification>,
}

pub enum NotificationAction {
    Push(Notification),
    FadeOut(NotificationId),
    Remove(NotificationId),
}

impl Reducible for NotificationList {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NotificationAction::Push(notification) => next.notifications.push(notification),
            NotificationAction::FadeOut(id) => {
                if let Some(notification) = next.notifications.iter_mut().find(|n| n.id == id) {
                    notification.fading_out = true;
                }
            }
            NotificationAction::Remove(id) => next.notifications.retain(|n| n.id != id),
        }
        Rc::new(next)
    }
}

/// Context for managing notifications throughout the application
#[derive(Clone)]
pub struct NotificationContext {
    list: UseReducerHandle<NotificationList>,
    next_id: Rc<Cell<NotificationId>>,
}

impl PartialEq for NotificationContext {
    fn eq(&self, other: &Self) -> bool {
        // Compare by the current notification list
        *self.list == *other.list
    }
}

impl NotificationContext {
    /// Push a new notification and schedule its auto-dismissal.
    pub fn push(&self, builder: NotificationBuilder) {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.list
            .dispatch(NotificationAction::Push(builder.build(id)));

        let dispatcher = self.list.dispatcher();
        Timeout::new(AUTO_DISMISS_MS, move || fade_out_then_remove(&dispatcher, id)).forget();
    }

    pub fn dismiss(&self, id: NotificationId) {
        fade_out_then_remove(&self.list.dispatcher(), id);
    }
}

impl Notifier for NotificationContext {
    fn notify_error(&self, message: &str) {
        self.push(Notification::error(message));
    }
}

fn fade_out_then_remove(dispatcher: &UseReducerDispatcher<NotificationList>, id: NotificationId) {
    dispatcher.dispatch(NotificationAction::FadeOut(id));
    let dispatcher = dispatcher.clone();
    Timeout::new(FADE_OUT_MS, move || {
        dispatcher.dispatch(NotificationAction::Remove(id));
    })
    .forget();
}

/// Properties for the NotificationProvider component
#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    pub children: Children,
}

/// Provider component that wraps the application and provides notification context
#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let list = use_reducer_eq(NotificationList::default);
    let next_id = use_memo((), |()| Cell::new(0));

    let context = NotificationContext {
        list: list.clone(),
        next_id,
    };

    let on_dismiss = {
        let context = context.clone();
        Callback::from(move |id: NotificationId| context.dismiss(id))
    };

    html! {
        <ContextProvider<NotificationContext> context={context}>
            { props.children.clone() }
            <NotificationToast
                notifications={list.notifications.clone()}
                on_dismiss={on_dismiss}
            />
        </ContextProvider<NotificationContext>>
    }
}

/// Properties for the NotificationToast component
#[derive(Properties, PartialEq)]
struct NotificationToastProps {
    notifications: Vec<Notification>,
    on_dismiss: Callback<NotificationId>,
}

/// Component that renders the notification toasts
#[function_component(NotificationToast)]
fn notification_toast(props: &NotificationToastProps) -> Html {
    if props.notifications.is_empty() {
        return html! {};
    }

    html! {
        <div class="notification-container">
            { for props.notifications.iter().map(|notification| {
                let id = notification.id;
                let on_dismiss = props.on_dismiss.clone();
                let onclick = Callback::from(move |_| on_dismiss.emit(id));

                let class = classes!(
                    "notification-toast",
                    notification.level.css_class(),
                    notification.fading_out.then_some("notification-fading-out")
                );

                html! {
                    <div class={class} key={notification.id}>
                        <span class="notification-icon">{ notification.level.icon() }</span>
                        <span class="notification-message">{ &notification.message }</span>
                        <button
                            class="notification-dismiss"
                            onclick={onclick}
                            aria-label="Dismiss notification"
                        >
                            {"×"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(list: NotificationList, action: NotificationAction) -> NotificationList {
        (*Rc::new(list).reduce(action)).clone()
    }

    #[test]
    fn push_fade_and_remove() {
        let list = reduce(
            NotificationList::default(),
            NotificationAction::Push(Notification::error("Repository not found").build(0)),
        );
        let list = reduce(
            list,
            NotificationAction::Push(Notification::success("Repository cloned").build(1)),
        );
        assert_eq!(2, list.notifications.len());
        assert_eq!(NotificationLevel::Error, list.notifications[0].level);

        let list = reduce(list, NotificationAction::FadeOut(0));
        assert!(list.notifications[0].fading_out);
        assert!(!list.notifications[1].fading_out);

        let list = reduce(list, NotificationAction::Remove(0));
        assert_eq!(1, list.notifications.len());
        assert_eq!("Repository cloned", list.notifications[0].message);
    }

    #[test]
    fn actions_on_unknown_ids_are_ignored() {
        let list = reduce(
            NotificationList::default(),
            NotificationAction::Push(Notification::info("Loading").build(3)),
        );
        let faded = reduce(list.clone(), NotificationAction::FadeOut(9));
        let removed = reduce(list.clone(), NotificationAction::Remove(9));
        assert_eq!(list, faded);
        assert_eq!(list, removed);
    }
}
