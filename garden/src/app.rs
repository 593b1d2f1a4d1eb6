//! Main application state and logic

use garden_core::{Category, FollowUpRequest, GardenSession, PlantEntry, SessionError};

use crate::ui::theme::GardenTheme;
use crate::ui::Overlay;

/// Work queued by a key press that needs the session's async API.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Plant {
        category: Category,
        answer: String,
    },
    Reflect {
        plant_id: String,
        question: String,
        answer: String,
    },
}

/// A generated follow-up, tagged with the dialog that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpReady {
    pub plant_id: String,
    pub request: u64,
    pub question: String,
}

/// Main application state
pub struct App {
    pub session: GardenSession,

    // UI state
    pub theme: GardenTheme,
    overlay: Option<Overlay>,
    selected: usize,

    // Dialog input
    input_buffer: String,
    cursor_position: usize,

    // Status
    status_message: Option<String>,

    // Async work
    pub pending_action: Option<PendingAction>,
    pub pending_follow_up: Option<(u64, FollowUpRequest)>,
    request_counter: u64,

    // Animation
    pub animation_frame: u8,
}

impl App {
    /// Create the app over an opened session.
    ///
    /// A first run opens the About dialog straight away.
    pub fn new(session: GardenSession) -> Self {
        let overlay = session.is_first_run().then_some(Overlay::About);
        let status = if session.garden().is_empty() {
            "Press n to plant your first seed".to_string()
        } else {
            format!("{} plants are waiting for you", session.garden().len())
        };

        Self {
            session,
            theme: GardenTheme::default(),
            overlay,
            selected: 0,
            input_buffer: String::new(),
            cursor_position: 0,
            status_message: Some(status),
            pending_action: None,
            pending_follow_up: None,
            request_counter: 0,
            animation_frame: 0,
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The plant under the cursor, if the garden has any.
    pub fn selected_plant(&self) -> Option<&PlantEntry> {
        self.session.garden().plants().get(self.selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (self.selected < self.session.garden().len()).then_some(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.session.garden().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.session.garden().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn select_last(&mut self) {
        self.selected = self.session.garden().len().saturating_sub(1);
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    /// Open the planting dialog with a randomly chosen category.
    pub fn start_planting(&mut self) {
        let category = self.session.start_planting();
        self.clear_input();
        self.overlay = Some(Overlay::Planting { category });
    }

    /// Open the selected plant and ask for its next question.
    ///
    /// The question arrives later through [`App::receive_follow_up`].
    pub fn open_selected(&mut self) {
        let Some(request) = self
            .selected_plant()
            .and_then(|plant| self.session.follow_up_request(&plant.id))
        else {
            self.set_status("Nothing planted yet. Press n to plant a seed");
            return;
        };

        self.request_counter += 1;
        self.clear_input();
        self.overlay = Some(Overlay::Reflecting {
            plant_id: request.plant_id.clone(),
            request: self.request_counter,
            question: None,
        });
        self.pending_follow_up = Some((self.request_counter, request));
    }

    /// Show a generated question if its dialog is still open.
    ///
    /// Returns false when the result was discarded as stale.
    pub fn receive_follow_up(&mut self, ready: FollowUpReady) -> bool {
        if let Some(Overlay::Reflecting {
            plant_id,
            request,
            question,
        }) = &mut self.overlay
        {
            if *plant_id == ready.plant_id && *request == ready.request && question.is_none() {
                *question = Some(ready.question);
                return true;
            }
        }

        tracing::debug!(
            plant_id = %ready.plant_id,
            request = ready.request,
            "discarding stale follow-up"
        );
        false
    }

    /// True while an open reflection dialog waits for its question.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.overlay,
            Some(Overlay::Reflecting { question: None, .. })
        )
    }

    /// Submit the open dialog's answer.
    ///
    /// Blank answers and reflections still waiting for a question are
    /// ignored, leaving the dialog open. Returns true when work was queued.
    pub fn submit(&mut self) -> bool {
        if self.input_buffer.trim().is_empty() {
            return false;
        }

        let action = match &self.overlay {
            Some(Overlay::Planting { category }) => PendingAction::Plant {
                category: *category,
                answer: self.input_buffer.clone(),
            },
            Some(Overlay::Reflecting {
                plant_id,
                question: Some(question),
                ..
            }) => PendingAction::Reflect {
                plant_id: plant_id.clone(),
                question: question.clone(),
                answer: self.input_buffer.clone(),
            },
            _ => return false,
        };

        self.pending_action = Some(action);
        self.overlay = None;
        self.clear_input();
        true
    }

    /// Apply the queued action through the session.
    pub async fn run_pending(&mut self) {
        let Some(action) = self.pending_action.take() else {
            return;
        };

        match action {
            PendingAction::Plant { category, answer } => {
                let result = self.session.plant_seed(category, &answer).await;
                self.finish_planting(category, result);
            }
            PendingAction::Reflect {
                plant_id,
                question,
                answer,
            } => {
                let result = self.session.reflect(&plant_id, &question, &answer).await;
                self.finish_reflecting(result);
            }
        }
    }

    fn finish_planting(
        &mut self,
        category: Category,
        result: Result<Option<PlantEntry>, SessionError>,
    ) {
        match result {
            Ok(Some(_)) => {
                self.select_last();
                self.set_status(format!("A seed of {category} is planted"));
            }
            Ok(None) => {}
            Err(e) => {
                // The plant stays in memory even though the write failed.
                self.select_last();
                self.set_status(format!("Could not save the garden: {e}"));
            }
        }
    }

    fn finish_reflecting(&mut self, result: Result<Option<PlantEntry>, SessionError>) {
        match result {
            Ok(Some(plant)) => {
                let message = if plant.stage.is_mature() && plant.reflections.len() > 5 {
                    format!("Your {} plant puts down deeper roots", plant.category)
                } else {
                    format!("Your {} plant grew into a {}", plant.category, plant.stage)
                };
                self.set_status(message);
            }
            Ok(None) => self.set_status("That plant is no longer here"),
            Err(e) => self.set_status(format!("Could not save the garden: {e}")),
        }
    }

    /// Toggle the About dialog
    pub fn toggle_about(&mut self) {
        if matches!(self.overlay, Some(Overlay::About)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::About);
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    /// Close any open overlay. A pending follow-up for it becomes stale.
    pub fn close_overlay(&mut self) {
        self.overlay = None;
        self.clear_input();
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    // =========================================================================
    // Input editing
    // =========================================================================
    // Edits are ignored while a reflection is still waiting for its question.

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        if self.is_loading() {
            return;
        }
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.is_loading() {
            return;
        }
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        if self.is_loading() {
            return;
        }
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// True when the open overlay takes typed text.
    pub fn is_editing(&self) -> bool {
        matches!(
            self.overlay,
            Some(Overlay::Planting { .. } | Overlay::Reflecting { .. })
        )
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }
}
