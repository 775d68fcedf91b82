//! The table store: one shared state, mutated only through dispatched actions,
//! persisted after every change and observed by subscribers.

use crate::data::datatable::Record;
use crate::data::table_state::TableState;
use crate::state::events::StoreAction;
use crate::state::storage::KeyValueStorage;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Storage key holding the serialised table state
pub const STATE_KEY: &str = "root";

/// Trait for components that observe store changes
pub trait StoreSubscriber {
    /// Called after an action changed the state
    fn on_action(&mut self, action: &StoreAction, state: &TableState);

    /// Get subscriber name for debugging
    fn name(&self) -> &str;
}

/// Logs every applied action
pub struct ActionLogSubscriber;

impl StoreSubscriber for ActionLogSubscriber {
    fn on_action(&mut self, action: &StoreAction, state: &TableState) {
        info!(
            target: "store",
            "{} -> {} rows, {} visible columns",
            action.summary(),
            state.rows.len(),
            state.visible_columns.len()
        );
    }

    fn name(&self) -> &str {
        "ActionLogSubscriber"
    }
}

pub struct Store {
    state: TableState,

    /// Bumped whenever the row list changes; cheap identity for memoised views
    revision: u64,

    storage: Option<Rc<dyn KeyValueStorage>>,

    subscribers: Vec<Box<dyn StoreSubscriber>>,

    /// Recent actions for the debug view
    history: VecDeque<String>,

    max_history: usize,
}

impl Store {
    /// In-memory store; nothing is persisted
    pub fn new(state: TableState) -> Self {
        Self {
            state,
            revision: 0,
            storage: None,
            subscribers: Vec::new(),
            history: VecDeque::new(),
            max_history: 100,
        }
    }

    /// Rehydrate from storage, falling back to the seeded state when nothing
    /// usable is stored. Never fails.
    pub fn load(storage: Rc<dyn KeyValueStorage>) -> Self {
        let state = match storage.get(STATE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<TableState>(&blob) {
                Ok(state) => {
                    info!(
                        target: "store",
                        "Restored {} rows and {} columns from storage",
                        state.rows.len(),
                        state.columns.len()
                    );
                    state
                }
                Err(e) => {
                    warn!(target: "store", "Ignoring unreadable persisted state: {}", e);
                    TableState::seeded()
                }
            },
            Ok(None) => {
                debug!(target: "store", "No persisted state, using sample data");
                TableState::seeded()
            }
            Err(e) => {
                warn!(target: "store", "Could not read persisted state: {}", e);
                TableState::seeded()
            }
        };

        let mut store = Self::new(state);
        store.storage = Some(storage);
        store
    }

    /// Forget any persisted state
    pub fn clear_persisted(storage: &dyn KeyValueStorage) -> anyhow::Result<()> {
        storage.remove(STATE_KEY)?;
        Ok(())
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn rows(&self) -> &[Record] {
        &self.state.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.state.columns
    }

    pub fn visible_columns(&self) -> &[String] {
        &self.state.visible_columns
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn StoreSubscriber>) {
        info!(target: "store", "Adding subscriber: {}", subscriber.name());
        self.subscribers.push(subscriber);
    }

    /// Apply an action. Returns whether the state changed; unchanged state is
    /// neither persisted nor announced.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        debug!(target: "store", "Dispatching {}", action.summary());

        self.history.push_back(action.summary());
        if self.history.len() > self.max_history {
            self.history.pop_front();
        }

        if !self.state.apply(&action) {
            return false;
        }

        if action.touches_rows() {
            self.revision += 1;
        }

        self.persist();

        for subscriber in &mut self.subscribers {
            subscriber.on_action(&action, &self.state);
        }
        true
    }

    /// Recent action summaries, oldest first
    pub fn action_history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        match serde_json::to_string(&self.state) {
            Ok(blob) => {
                if let Err(e) = storage.set(STATE_KEY, &blob) {
                    warn!(target: "store", "Failed to persist table state: {}", e);
                }
            }
            Err(e) => warn!(target: "store", "Failed to serialise table state: {}", e),
        }
    }
}
