// libs/faq-cell/src/services/faq.rs
use shared_database::{AppState, Datastore};

pub struct FaqService {
    store: Datastore,
}

impl FaqService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Case-insensitive substring lookup of the query against the stored FAQ
    /// questions, first match wins.
    pub fn answer(&self, question: &str) -> Option<String> {
        let query = question.to_lowercase();
        self.store
            .faqs()
            .iter()
            .find(|faq| faq.question.to_lowercase().contains(&query))
            .map(|faq| faq.answer.clone())
    }
}
