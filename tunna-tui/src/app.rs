use tunna_core::{
    model::{DisposalInformation, LabelValue},
    service::DisposalService,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    AddressSearch,
    ScheduleView,
}

pub(crate) struct App {
    pub service: DisposalService,

    pub screen: Screen,

    pub address_input: String,
    pub suggestions: Vec<LabelValue>,
    pub suggestion_index: usize,

    pub information: Option<DisposalInformation>,

    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: DisposalService) -> Self {
        Self {
            service,
            screen: Screen::AddressSearch,
            address_input: String::new(),
            suggestions: Vec::new(),
            suggestion_index: 0,
            information: None,
            error_message: None,
        }
    }

    /// Re-run autocomplete for the current input. Suppression stays off so
    /// a fully typed address still shows its single confirming suggestion.
    pub(crate) fn refresh_suggestions(&mut self) {
        if self.address_input.trim().is_empty() {
            self.suggestions.clear();
        } else {
            self.suggestions = self.service.autocomplete_search(&self.address_input, false);
        }
        self.suggestion_index = 0;
        self.error_message = None;
    }

    /// Copy the highlighted suggestion into the input and search again.
    pub(crate) fn accept_current_suggestion(&mut self) {
        if let Some(suggestion) = self.suggestions.get(self.suggestion_index) {
            self.address_input = suggestion.label.clone();
            self.refresh_suggestions();
        }
    }

    /// Resolve the current input to its area and schedules.
    pub(crate) fn lookup_current(&mut self) {
        match self.service.disposal_information(&self.address_input) {
            Some(information) if information.area.is_some() => {
                self.information = Some(information);
                self.screen = Screen::ScheduleView;
                self.error_message = None;
            }
            _ => {
                self.error_message = Some(format!(
                    "No collection area found for \"{}\"",
                    self.address_input.trim()
                ));
            }
        }
    }
}
