use crate::calculator::config::CalculatorConfig;
use crate::calculator::operations::{CalcError, CalculationOutcome, CalculationRequest, calculate};
use crate::calculator::{CalculationKind, CalculatorMode};
use crate::symbolic::symbolic_traits::{CalculusBackend, SymbolicBackend};
use log::{info, warn};
use tabled::Tabled;

/// The input fields of the calculator, kept as typed
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorForm {
    pub mode: CalculatorMode,
    pub expression: String,
    pub variable: String,
    pub lower: String,
    pub upper: String,
    pub limit_point: String,
}

impl CalculatorForm {
    pub fn new(default_variable: &str) -> Self {
        CalculatorForm {
            mode: CalculatorMode::default(),
            expression: String::new(),
            variable: default_variable.to_string(),
            lower: String::new(),
            upper: String::new(),
            limit_point: String::new(),
        }
    }
}

/// One line of the calculation history
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct CalculationRecord {
    #[tabled(rename = "Type")]
    pub kind: CalculationKind,
    #[tabled(rename = "Input")]
    pub display_input: String,
    #[tabled(rename = "Result")]
    pub display_result: String,
}

impl From<&CalculationOutcome> for CalculationRecord {
    fn from(outcome: &CalculationOutcome) -> Self {
        CalculationRecord {
            kind: outcome.kind,
            display_input: outcome.history_input.clone(),
            display_result: outcome.result.clone(),
        }
    }
}

/// State of an interactive calculator: settings, engine, form, last outcome and history.
///
/// The history only grows: one record per successful calculation, nothing on failure, and
/// `clear` leaves it alone.
pub struct CalculatorSession<B: CalculusBackend = SymbolicBackend> {
    config: CalculatorConfig,
    backend: B,
    form: CalculatorForm,
    last_outcome: Option<Result<CalculationOutcome, String>>,
    history: Vec<CalculationRecord>,
}

impl Default for CalculatorSession<SymbolicBackend> {
    fn default() -> Self {
        CalculatorSession::new(CalculatorConfig::default(), SymbolicBackend)
    }
}

impl<B: CalculusBackend> CalculatorSession<B> {
    pub fn new(config: CalculatorConfig, backend: B) -> Self {
        let form = CalculatorForm::new(&config.default_variable);
        CalculatorSession {
            config,
            backend,
            form,
            last_outcome: None,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn form(&self) -> &CalculatorForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CalculatorForm {
        &mut self.form
    }

    pub fn mode(&self) -> CalculatorMode {
        self.form.mode
    }

    /// Switches the active tab; the fields keep their contents.
    pub fn select_mode(&mut self, mode: CalculatorMode) {
        self.form.mode = mode;
    }

    /// The last outcome: the result on success, the user message on failure.
    pub fn last_outcome(&self) -> Option<&Result<CalculationOutcome, String>> {
        self.last_outcome.as_ref()
    }

    pub fn history(&self) -> &[CalculationRecord] {
        &self.history
    }

    /// Runs the calculation of the active tab on the current form.
    pub fn calculate(&mut self) -> Result<CalculationOutcome, CalcError> {
        self.last_outcome = None;
        let settings = self.config.estimator_settings();
        let result = CalculationRequest::from_form(&self.form, &self.backend).and_then(|request| {
            calculate(&self.backend, &request, &settings, self.config.decimal_places)
        });
        match result {
            Ok(outcome) => {
                self.history.push(CalculationRecord::from(&outcome));
                info!("history holds {} calculations", self.history.len());
                self.last_outcome = Some(Ok(outcome.clone()));
                Ok(outcome)
            }
            Err(err) => {
                match &err {
                    CalcError::Evaluation { source, .. } => {
                        warn!("{} calculation failed: {}", self.form.mode, source)
                    }
                    CalcError::Input(message) => warn!("rejected input: {}", message),
                }
                self.last_outcome = Some(Err(err.user_message()));
                Err(err)
            }
        }
    }

    /// Resets the fields and the last outcome; the active tab and the history are kept.
    pub fn clear(&mut self) {
        let mode = self.form.mode;
        self.form = CalculatorForm::new(&self.config.default_variable);
        self.form.mode = mode;
        self.last_outcome = None;
    }
}
