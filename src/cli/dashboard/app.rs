use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tracing::{debug, info};

use super::input::TextField;
use crate::batch::{
    Batch, BatchCollection, BatchError, BatchFactory, NewBatchForm, Stage, StageFilter,
    ValidationErrors, Variety,
};
use crate::config::{Config, SummaryConfig};
use crate::pod::{PodScene, PodSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Cards,
    Pod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Weight,
    Variety,
    Date,
    Notes,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Weight,
        FormField::Variety,
        FormField::Date,
        FormField::Notes,
    ];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Name used by validation errors for this field.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Weight => "weight",
            FormField::Variety => "variety",
            FormField::Date => "date",
            FormField::Notes => "notes",
        }
    }
}

/// State of the "New Batch" modal.
#[derive(Debug, Clone)]
pub struct NewBatchModal {
    pub weight: TextField,
    pub variety: Variety,
    pub date: TextField,
    pub notes: TextField,
    pub focus: FormField,
    pub errors: Option<ValidationErrors>,
}

impl NewBatchModal {
    fn blank(today: NaiveDate) -> Self {
        let form = NewBatchForm::blank(today);
        Self {
            weight: TextField::with_text(&form.weight),
            variety: Variety::Amelonado,
            date: TextField::with_text(&form.date),
            notes: TextField::with_text(&form.notes),
            focus: FormField::Weight,
            errors: None,
        }
    }

    pub fn form(&self) -> NewBatchForm {
        NewBatchForm {
            weight: self.weight.text().to_string(),
            variety: self.variety.name().to_string(),
            date: self.date.text().to_string(),
            notes: self.notes.text().to_string(),
        }
    }

    fn focused_text(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormField::Weight => Some(&mut self.weight),
            FormField::Date => Some(&mut self.date),
            FormField::Notes => Some(&mut self.notes),
            FormField::Variety => None,
        }
    }

    fn cycle_variety(&mut self, forward: bool) {
        let all = Variety::ALL;
        let i = all.iter().position(|v| *v == self.variety).unwrap_or(0);
        let next = if forward {
            (i + 1) % all.len()
        } else {
            (i + all.len() - 1) % all.len()
        };
        self.variety = all[next];
    }
}

/// Whole dashboard session: the batch collection plus everything the screen
/// needs to draw it.
pub struct App {
    collection: BatchCollection,
    factory: BatchFactory,
    farmer_name: String,
    summary: SummaryConfig,
    tabs: Vec<StageFilter>,
    tab: usize,
    selected: usize,
    view: View,
    modal: Option<NewBatchModal>,
    /// Kept after a cancel so reopening shows what was typed.
    draft: Option<NewBatchModal>,
    pod: Option<PodScene>,
    today: NaiveDate,
    time: NaiveTime,
    notice: Option<String>,
}

impl App {
    pub fn new(collection: BatchCollection, config: &Config, today: NaiveDate, time: NaiveTime) -> Self {
        let tabs = StageFilter::tabs();
        let default_filter = config.default_filter();
        let tab = tabs.iter().position(|t| *t == default_filter).unwrap_or(0);

        let mut app = Self {
            collection,
            factory: BatchFactory::new(config.batches.fermentation_days),
            farmer_name: config.farmer.name.clone(),
            summary: config.summary.clone(),
            tabs,
            tab,
            selected: 0,
            view: if config.dashboard.start_in_pod_view {
                View::Pod
            } else {
                View::Cards
            },
            modal: None,
            draft: None,
            pod: None,
            today,
            time,
            notice: None,
        };
        app.sync_pod();
        app
    }

    pub fn collection(&self) -> &BatchCollection {
        &self.collection
    }

    pub fn farmer_name(&self) -> &str {
        &self.farmer_name
    }

    pub fn summary(&self) -> &SummaryConfig {
        &self.summary
    }

    pub fn tabs(&self) -> &[StageFilter] {
        &self.tabs
    }

    pub fn tab_index(&self) -> usize {
        self.tab
    }

    pub fn active_filter(&self) -> StageFilter {
        self.tabs[self.tab]
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn modal(&self) -> Option<&NewBatchModal> {
        self.modal.as_ref()
    }

    pub fn pod(&self) -> Option<&PodScene> {
        self.pod.as_ref()
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = time;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Batches on the current tab, newest first.
    pub fn visible(&self) -> Vec<&Batch> {
        self.collection.filtered(self.active_filter())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The batch the pod shows: the selected card, else the newest batch.
    pub fn active_batch(&self) -> Option<&Batch> {
        self.visible()
            .get(self.selected)
            .copied()
            .or_else(|| self.collection.iter().next())
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some(pod) = self.pod.as_mut() {
            pod.tick(dt);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Control::Quit;
        }

        if self.modal.is_some() {
            self.handle_modal_key(key);
            return Control::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Right | KeyCode::Tab => self.select_tab((self.tab + 1) % self.tabs.len()),
            KeyCode::Left | KeyCode::BackTab => {
                self.select_tab((self.tab + self.tabs.len() - 1) % self.tabs.len())
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < self.tabs.len() {
                    self.select_tab(index);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char('n') => self.open_modal(),
            KeyCode::Char('p') => {
                self.view = match self.view {
                    View::Cards => View::Pod,
                    View::Pod => View::Cards,
                };
                debug!(view = ?self.view, "Switched view");
            }
            _ => {}
        }

        Control::Continue
    }

    fn select_tab(&mut self, index: usize) {
        self.tab = index;
        self.selected = 0;
        self.notice = None;
        debug!(tab = %self.active_filter(), "Selected tab");
        self.sync_pod();
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.visible().len();
        if count == 0 {
            return;
        }
        let next = (self.selected as isize + delta).clamp(0, count as isize - 1);
        self.selected = next as usize;
        self.sync_pod();
    }

    fn open_modal(&mut self) {
        let today = self.today;
        self.modal = Some(self.draft.take().unwrap_or_else(|| NewBatchModal::blank(today)));
        self.notice = None;
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.draft = self.modal.take();
            }
            KeyCode::Enter => self.submit_modal(),
            KeyCode::Tab | KeyCode::Down => modal.focus = modal.focus.next(),
            KeyCode::BackTab | KeyCode::Up => modal.focus = modal.focus.prev(),
            KeyCode::Left if modal.focus == FormField::Variety => modal.cycle_variety(false),
            KeyCode::Right if modal.focus == FormField::Variety => modal.cycle_variety(true),
            KeyCode::Char(' ') if modal.focus == FormField::Variety => modal.cycle_variety(true),
            code => {
                if let Some(field) = modal.focused_text() {
                    match code {
                        KeyCode::Char(c) => field.insert(c),
                        KeyCode::Backspace => field.backspace(),
                        KeyCode::Left => field.left(),
                        KeyCode::Right => field.right(),
                        KeyCode::Home => field.home(),
                        KeyCode::End => field.end(),
                        _ => {}
                    }
                }
            }
        }
    }

    fn submit_modal(&mut self) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        let form = modal.form();

        match self.collection.submit(&self.factory, &form) {
            Ok(batch) => {
                info!(label = batch.label(), "Batch started from dashboard");
                self.notice = Some(format!("{} started fermenting", batch.label()));
                self.modal = None;
                self.draft = None;
                if !self.active_filter().matches(Stage::Fermenting) {
                    self.tab = 0;
                }
                self.selected = 0;
                self.sync_pod();
            }
            Err(BatchError::Validation(errors)) => {
                if let Some(field) = FormField::ORDER
                    .into_iter()
                    .find(|f| errors.has_field(f.key()))
                {
                    modal.focus = field;
                }
                modal.errors = Some(errors);
            }
            Err(e) => {
                modal.errors = None;
                self.notice = Some(e.to_string());
            }
        }
    }

    fn sync_pod(&mut self) {
        let Some(snapshot) = self.active_batch().map(PodSnapshot::of) else {
            self.pod = None;
            return;
        };
        if let Some(scene) = self.pod.as_mut() {
            scene.show(snapshot);
        } else {
            self.pod = Some(PodScene::new(snapshot));
        }
    }
}
