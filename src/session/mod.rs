use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::format::{self, DisplayBlock};
use crate::provider::ContentRequester;
use crate::prompt::ProductDetails;

/// What the user currently sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub busy: bool,
    pub raw: Option<String>,
    pub blocks: Vec<DisplayBlock>,
    pub error: Option<String>,
}

/// Holds UI state around the requester so that only one generation runs at a time.
pub struct Session<R: ContentRequester> {
    requester: R,
    state: Mutex<ViewState>,
}

impl<R: ContentRequester> Session<R> {
    pub fn new(requester: R) -> Self {
        Self { requester, state: Mutex::new(ViewState::default()) }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.lock().clone()
    }

    /// Run one generation and update the view.
    ///
    /// Returns `None` without touching the requester if a generation is
    /// already outstanding.
    pub async fn generate(&self, details: &ProductDetails) -> Option<ViewState> {
        {
            let mut st = self.state.lock();
            if st.busy {
                debug!("generation already in flight; ignoring request");
                return None;
            }
            st.busy = true;
        }

        let result = self.requester.request_description(details).await;

        let mut st = self.state.lock();
        st.busy = false;
        match result {
            Ok(text) => {
                st.blocks = format::format(&text);
                st.raw = Some(text);
                st.error = None;
            }
            Err(e) => {
                warn!(error = %e, "generation failed");
                st.blocks.clear();
                st.raw = None;
                st.error = Some(e.to_string());
            }
        }
        Some(st.clone())
    }
}
