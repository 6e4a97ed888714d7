/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::{Fetch, Notice, Route};
use connector::resource;
use connector::{
    ConnectorError, FieldKind, FieldSpec, RequestConfig, Resource, ResourceKind, SelectOption,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please select a {0}")]
    MissingSelection(String),
    #[error("{0} is required")]
    MissingField(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
    #[error("a submission is already in progress")]
    InFlight,
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Create or edit form for one record, one local value per attribute.
pub struct FormView<R: Resource> {
    config: RequestConfig,
    mode: FormMode,
    values: Map<String, Value>,
    options: HashMap<ResourceKind, Fetch<Vec<SelectOption>>>,
    record: Fetch<()>,
    submitting: bool,
    notice: Option<Notice>,
    _resource: PhantomData<R>,
}

/// Clears the in-flight flag when `submit` is dropped mid-request.
struct InFlight<'a>(&'a mut bool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl<R: Resource> FormView<R> {
    pub fn create(config: RequestConfig) -> Self {
        Self::new(config, FormMode::Create)
    }

    pub fn edit(config: RequestConfig, id: i64) -> Self {
        Self::new(config, FormMode::Edit(id))
    }

    fn new(config: RequestConfig, mode: FormMode) -> Self {
        let values = R::FIELDS
            .iter()
            .map(|field| (field.name.to_string(), empty_value(field.kind)))
            .collect();

        let record = match mode {
            FormMode::Create => Fetch::Loaded(()),
            FormMode::Edit(_) => Fetch::Loading,
        };

        Self {
            config,
            mode,
            values,
            options: HashMap::new(),
            record,
            submitting: false,
            notice: None,
            _resource: PhantomData,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields() -> &'static [FieldSpec] {
        R::FIELDS
    }

    /// Whether the record under edit has been fetched. Always loaded when creating.
    pub fn record(&self) -> &Fetch<()> {
        &self.record
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> String {
        match (self.mode, self.submitting) {
            (FormMode::Create, true) => "Saving…".to_string(),
            (FormMode::Edit(_), true) => "Updating…".to_string(),
            (FormMode::Create, false) => format!("Save {}", R::KIND.title()),
            (FormMode::Edit(_), false) => format!("Update {}", R::KIND.title()),
        }
    }

    /// Choices for a foreign-key field, `None` before `mount`.
    pub fn options(&self, kind: ResourceKind) -> Option<&Fetch<Vec<SelectOption>>> {
        self.options.get(&kind)
    }

    /// Fetches every referenced collection for the selects and, when editing,
    /// the record itself.
    pub async fn mount(&mut self) {
        let references: Vec<ResourceKind> = R::references().into_iter().map(|(_, k)| k).collect();

        for kind in &references {
            self.options.insert(*kind, Fetch::Loading);
        }

        let options = futures::future::join_all(
            references
                .iter()
                .map(|kind| resource::options(&self.config, *kind)),
        );

        let record = async {
            match self.mode {
                FormMode::Edit(id) => Some(resource::get::<R>(&self.config, id).await),
                FormMode::Create => None,
            }
        };

        let (options, record) = futures::join!(options, record);

        for (kind, result) in references.into_iter().zip(options) {
            let state = match result {
                Ok(options) => Fetch::Loaded(options),
                Err(e) => {
                    tracing::error!("Error fetching {}: {}", kind.plural(), e);
                    Fetch::Failed(format!("Failed to load {}: {}", kind.plural(), e))
                }
            };
            self.options.insert(kind, state);
        }

        match record {
            Some(Ok(record)) => {
                self.fill(&record);
                self.record = Fetch::Loaded(());
            }
            Some(Err(e)) => {
                tracing::error!("Error fetching {}: {}", R::KIND.singular(), e);
                let message = format!("Failed to load {}: {}", R::KIND.singular(), e);
                self.notice = Some(Notice::error(message.clone()));
                self.record = Fetch::Failed(message);
            }
            None => {}
        }
    }

    /// Takes every attribute of the record, so ones without a form field
    /// survive the full replacement on submit.
    fn fill(&mut self, record: &R) {
        let mut values = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map,
            _ => return,
        };

        for field in R::FIELDS {
            if values.get(field.name).is_none_or(Value::is_null) {
                values.insert(field.name.to_string(), empty_value(field.kind));
            }
        }

        self.values = values;
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Current value as the user would type it.
    pub fn text(&self, field: &str) -> String {
        match self.values.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Sets a field from user input, parsed according to its kind.
    pub fn set(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let target = R::FIELDS
            .iter()
            .find(|f| f.name == field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;

        let invalid = |message: String| FormError::InvalidValue {
            field: target.label.to_string(),
            message,
        };

        let value = match target.kind {
            FieldKind::ForeignKey(_) => match raw.trim() {
                "" => Value::Null,
                id => Value::from(id.parse::<i64>().map_err(|e| invalid(e.to_string()))?),
            },
            FieldKind::Checkbox => Value::Bool(parse_checkbox(raw).ok_or_else(|| {
                invalid(format!("expected yes or no, got \"{}\"", raw.trim()))
            })?),
            _ => Value::String(raw.to_string()),
        };

        self.values.insert(target.name.to_string(), value);
        Ok(())
    }

    pub fn select(&mut self, field: &str, id: Option<i64>) -> Result<(), FormError> {
        self.set(field, &id.map(|id| id.to_string()).unwrap_or_default())
    }

    /// Checks that every foreign key is selected and every required field is
    /// filled in. Nothing else is validated locally.
    pub fn validate(&self) -> Result<(), FormError> {
        for field in R::FIELDS {
            let value = self.values.get(field.name).unwrap_or(&Value::Null);

            match field.kind {
                FieldKind::ForeignKey(_) => {
                    if value.as_i64().filter(|id| *id != 0).is_none() {
                        return Err(FormError::MissingSelection(field.label.to_lowercase()));
                    }
                }
                FieldKind::Checkbox => {}
                _ if field.required => {
                    if value.as_str().is_none_or(|s| s.trim().is_empty()) {
                        return Err(FormError::MissingField(field.label.to_string()));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Validates the form and marks it as submitting. The returned
    /// submission carries the request; its result goes back through
    /// `finish_submit`, which clears the in-flight state. While a submission
    /// is outstanding `submit_label` reads "Saving…" or "Updating…" and a
    /// second start is refused.
    pub fn start_submit(&mut self) -> Result<Submission<R>, FormError> {
        if self.submitting {
            return Err(FormError::InFlight);
        }

        if let Err(e) = self.validate() {
            self.notice = Some(Notice::error(e.to_string()));
            return Err(e);
        }

        let record: R = serde_json::from_value(Value::Object(self.values.clone())).map_err(|e| {
            FormError::InvalidValue {
                field: R::KIND.singular().to_string(),
                message: e.to_string(),
            }
        })?;

        self.notice = None;
        self.submitting = true;

        Ok(Submission {
            config: self.config.clone(),
            mode: self.mode,
            record,
        })
    }

    /// Ends a submission. On success the route of the resource list is
    /// returned; on failure the form keeps its values and shows the error.
    pub fn finish_submit(&mut self, result: Result<(), ConnectorError>) -> Result<Route, FormError> {
        self.submitting = false;

        match result {
            Ok(()) => Ok(Route::List(R::KIND)),
            Err(e) => {
                let verb = match self.mode {
                    FormMode::Create => "saving",
                    FormMode::Edit(_) => "updating",
                };
                tracing::error!("Error {} {}: {}", verb, R::KIND.singular(), e);

                let message = format!("Error {} {}: {}", verb, R::KIND.singular(), e);
                self.notice = Some(Notice::error(message.clone()));
                Err(FormError::Rejected(message))
            }
        }
    }

    /// Sends the form in one step. Nothing is sent when validation fails.
    pub async fn submit(&mut self) -> Result<Route, FormError> {
        let submission = self.start_submit()?;

        let result = {
            let _in_flight = InFlight(&mut self.submitting);
            submission.send().await
        };

        self.finish_submit(result)
    }
}

/// A validated record on its way to the backend.
#[derive(Debug)]
pub struct Submission<R: Resource> {
    config: RequestConfig,
    mode: FormMode,
    record: R,
}

impl<R: Resource> Submission<R> {
    pub fn record(&self) -> &R {
        &self.record
    }

    /// POST for a new record, PUT for an edited one.
    pub async fn send(self) -> Result<(), ConnectorError> {
        match self.mode {
            FormMode::Create => resource::post(&self.config, &self.record).await,
            FormMode::Edit(id) => resource::put(&self.config, id, &self.record).await,
        }
    }
}

fn empty_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::ForeignKey(_) => Value::Null,
        FieldKind::Checkbox => Value::Bool(false),
        _ => Value::String(String::new()),
    }
}

fn parse_checkbox(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "" | "n" | "no" | "false" | "0" => Some(false),
        "y" | "yes" | "true" | "1" => Some(true),
        _ => None,
    }
}
