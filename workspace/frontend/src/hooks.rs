use std::rc::Rc;

use common::{DashboardState, FetchError, FetchTicket, RepositoryCatalog, StatsPayload};
use yew::prelude::*;

use crate::api_client;
use crate::settings;

pub enum DashboardAction {
    /// The user picked a repository in the sidebar
    Select(String),
    /// A stats request finished
    Resolve(FetchTicket, Result<StatsPayload, FetchError>),
}

/// [`DashboardState`] driven through a Yew reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStore(pub DashboardState);

impl Reducible for DashboardStore {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();

        let changed = match action {
            DashboardAction::Select(key) => state.select(&key).is_some(),
            DashboardAction::Resolve(ticket, outcome) => state.resolve(&ticket, outcome),
        };

        if changed {
            Rc::new(Self(state))
        } else {
            self
        }
    }
}

impl DashboardStore {
    /// Ticket of the request the current state is waiting for, if any
    pub fn pending(&self) -> Option<FetchTicket> {
        self.0.is_loading().then(|| self.0.current_ticket())
    }
}

/// The request to start for `pending`, or `None` when it was already sent.
pub fn request_to_send(last_sent: Option<&FetchTicket>, pending: Option<FetchTicket>) -> Option<FetchTicket> {
    pending.filter(|ticket| last_sent != Some(ticket))
}

/// Dashboard state plus a callback selecting a repository by key.
///
/// Whenever the state is loading a new ticket, the request is sent and its
/// outcome dispatched back into the reducer.
#[hook]
pub fn use_dashboard(catalog: RepositoryCatalog) -> (UseReducerHandle<DashboardStore>, Callback<String>) {
    let store = use_reducer(move || {
        let policy = settings::get_settings().stale_policy;
        log::debug!("Dashboard starting with stale result policy {:?}", policy);
        DashboardStore(DashboardState::new(catalog, policy))
    });

    let last_sent = use_mut_ref(|| None::<FetchTicket>);

    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.pending(), move |pending| {
            let next = request_to_send(last_sent.borrow().as_ref(), pending.clone());
            if let Some(ticket) = next {
                *last_sent.borrow_mut() = Some(ticket.clone());
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = api_client::fetch_repository_stats(&ticket).await;
                    dispatcher.dispatch(DashboardAction::Resolve(ticket, outcome));
                });
            }
            || ()
        });
    }

    let on_select = {
        let dispatcher = store.dispatcher();
        Callback::from(move |key: String| {
            log::debug!("Repository clicked: {}", key);
            dispatcher.dispatch(DashboardAction::Select(key));
        })
    };

    (store, on_select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{FetchState, StalePolicy};

    fn store() -> Rc<DashboardStore> {
        Rc::new(DashboardStore(DashboardState::new(
            RepositoryCatalog::default(),
            StalePolicy::default(),
        )))
    }

    /// Reducer plus the request bookkeeping of `use_dashboard`.
    struct Session {
        store: Rc<DashboardStore>,
        last_sent: Option<FetchTicket>,
        sent: Vec<FetchTicket>,
    }

    impl Session {
        fn start() -> Self {
            let mut session = Session {
                store: store(),
                last_sent: None,
                sent: Vec::new(),
            };
            session.run_effect();
            session
        }

        fn run_effect(&mut self) {
            if let Some(ticket) = request_to_send(self.last_sent.as_ref(), self.store.pending()) {
                self.last_sent = Some(ticket.clone());
                self.sent.push(ticket);
            }
        }

        fn dispatch(&mut self, action: DashboardAction) {
            self.store = self.store.clone().reduce(action);
            self.run_effect();
        }

        fn resolve_last(&mut self, outcome: Result<StatsPayload, FetchError>) {
            let ticket = self.sent.last().cloned().unwrap();
            self.dispatch(DashboardAction::Resolve(ticket, outcome));
        }
    }

    #[test]
    fn test_initial_request_pending() {
        let store = store();
        let ticket = store.pending().unwrap();
        assert_eq!(ticket.repository, "angular/angular");
    }

    #[test]
    fn test_resolve_settles_and_clears_pending() {
        let store = store();
        let ticket = store.pending().unwrap();

        let next = store.reduce(DashboardAction::Resolve(ticket, Ok(StatsPayload::empty())));

        assert!(next.pending().is_none());
        assert_eq!(next.0.fetch_state(), &FetchState::Loaded(StatsPayload::empty()));
    }

    #[test]
    fn test_ignored_selection_keeps_same_store() {
        let store = store();

        // another repository is disabled while the first request is in flight
        let next = store.clone().reduce(DashboardAction::Select("golang/go".to_string()));

        assert!(Rc::ptr_eq(&store, &next));
    }

    #[test]
    fn test_select_after_settle_queues_new_request() {
        let store = store();
        let ticket = store.pending().unwrap();
        let settled = store.reduce(DashboardAction::Resolve(
            ticket.clone(),
            Err(FetchError::Status(502)),
        ));

        let next = settled.reduce(DashboardAction::Select("golang/go".to_string()));

        let pending = next.pending().unwrap();
        assert_eq!(pending.repository, "golang/go");
        assert_ne!(pending.generation, ticket.generation);
    }

    #[test]
    fn test_request_to_send_skips_already_sent_ticket() {
        let ticket = store().pending().unwrap();

        assert_eq!(request_to_send(None, Some(ticket.clone())), Some(ticket.clone()));
        assert_eq!(request_to_send(Some(&ticket), Some(ticket.clone())), None);
        assert_eq!(request_to_send(Some(&ticket), None), None);
    }

    #[test]
    fn test_one_request_per_selection() {
        let mut session = Session::start();
        assert_eq!(session.sent.len(), 1);
        assert_eq!(session.sent[0].repository, "angular/angular");

        // re-click on the in-flight option
        session.dispatch(DashboardAction::Select("angular/angular".to_string()));
        assert_eq!(session.sent.len(), 1);
        assert_eq!(session.store.pending(), Some(session.sent[0].clone()));

        session.resolve_last(Ok(StatsPayload::empty()));
        assert_eq!(session.sent.len(), 1);
        assert!(session.store.pending().is_none());

        session.dispatch(DashboardAction::Select("golang/go".to_string()));
        assert_eq!(session.sent.len(), 2);
        assert_eq!(session.sent[1].repository, "golang/go");

        session.resolve_last(Err(FetchError::Transport("offline".to_string())));
        assert_eq!(session.sent.len(), 2);

        // reselecting a failed option retries once
        session.dispatch(DashboardAction::Select("golang/go".to_string()));
        assert_eq!(session.sent.len(), 3);
        assert_ne!(session.sent[2].generation, session.sent[1].generation);
    }

    #[test]
    fn test_settled_store_sends_nothing_for_every_repository() {
        let mut session = Session::start();
        session.resolve_last(Ok(StatsPayload::empty()));

        let keys: Vec<String> = RepositoryCatalog::default()
            .repositories()
            .iter()
            .map(|option| option.key.clone())
            .collect();

        for key in keys {
            let before = session.sent.len();
            session.dispatch(DashboardAction::Select(key.clone()));
            assert_eq!(session.sent.len(), before + 1, "{} sent once", key);
            assert_eq!(session.sent.last().unwrap().repository, key);

            session.resolve_last(Err(FetchError::Status(502)));
            assert!(session.store.pending().is_none(), "{} settled", key);
            assert_eq!(session.sent.len(), before + 1);
        }
    }
}
