//! News item domain model, submitted form data and form descriptors.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use shared::validation::validate_not_blank;

use super::category::NewsCategory;

/// A selectable value in a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

pub const INTEGRATION_NEWS_TYPES: &[Choice] = &[
    Choice { value: "software_release", label: "Software Release" },
    Choice { value: "new_roadmap", label: "New Integration Roadmap" },
    Choice { value: "changed_roadmap", label: "Changed Integration Roadmap" },
    Choice { value: "new_roadmap_task", label: "New Integration Roadmap Task" },
    Choice { value: "changed_roadmap_task", label: "Changed Integration Roadmap Task" },
];

pub const AFFECTED_ELEMENTS: &[Choice] = &[
    Choice {
        value: "cloud_roadmap",
        label: "ACCESS Allocated Production Cloud - Integration Roadmap",
    },
    Choice {
        value: "compute_roadmap",
        label: "ACCESS Allocated Production Compute - Integration Roadmap",
    },
    Choice {
        value: "storage_roadmap",
        label: "ACCESS Allocated Production Storage - Integration Roadmap",
    },
    Choice {
        value: "science_gateway_roadmap",
        label: "ACCESS Integrated Science Gateway - Integration Roadmap",
    },
    Choice { value: "nagios", label: "ACCESS Monitoring Service - Nagios" },
    Choice {
        value: "online_service_roadmap",
        label: "ACCESS Production Online Service - Integration Roadmap",
    },
    Choice { value: "aws_registry", label: "ACCESS Public AWS Container Registry" },
    Choice { value: "cider", label: "CiDeR - CyberInfrastructure Description Repository" },
    Choice {
        value: "ipf",
        label: "Information Publishing Framework (IPF) tool for publishing compute resource information",
    },
];

const CONTENT_HELP: &str = "To update news content text please follow formatting guidance at \
    https://operations.access-ci.org/operational-status-communications";

/// A stored news item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NewsItem {
    pub id: i64,
    pub category: NewsCategory,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub author_id: Uuid,
    pub author_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted add/update form.
///
/// Missing text fields deserialize as empty so that they surface as field
/// errors rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewsForm {
    #[serde(default)]
    #[validate(
        length(max = 200, message = "Subject must be at most 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,

    #[validate(length(max = 50, message = "News type must be at most 50 characters"))]
    pub news_type: Option<String>,

    #[validate(length(max = 100, message = "Affected element must be at most 100 characters"))]
    pub affected_element: Option<String>,

    #[validate(
        url(message = "Enter a valid URL"),
        length(max = 200, message = "URL must be at most 200 characters")
    )]
    pub external_url: Option<String>,

    pub effective_date: Option<NaiveDate>,

    pub expiration_date: Option<NaiveDate>,

    /// Honoured on create only.
    pub is_active: Option<bool>,
}

/// Validated field values for one category, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsFields {
    pub title: String,
    pub content: String,
    pub news_type: Option<String>,
    pub affected_element: Option<String>,
    pub external_url: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
}

impl NewsForm {
    /// Validates the form for `category` and returns only the fields that
    /// category stores.
    ///
    /// Blank optional strings count as absent. Dates are not checked
    /// against each other.
    pub fn clean(mut self, category: NewsCategory) -> Result<NewsFields, ValidationErrors> {
        let integration = category == NewsCategory::Integration;
        self.news_type = non_blank(self.news_type).filter(|_| integration);
        self.affected_element = non_blank(self.affected_element).filter(|_| integration);
        // Fields a category does not store are dropped before validation
        self.external_url =
            non_blank(self.external_url).filter(|_| category == NewsCategory::Access);

        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if integration {
            if let Err(e) = require_choice(self.news_type.as_deref(), INTEGRATION_NEWS_TYPES) {
                errors.add("news_type", e);
            }
            if let Err(e) = require_choice(self.affected_element.as_deref(), AFFECTED_ELEMENTS) {
                errors.add("affected_element", e);
            }
        }

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(NewsFields {
            title: self.title,
            content: self.content,
            news_type: self.news_type,
            affected_element: self.affected_element,
            external_url: self.external_url,
            effective_date: self.effective_date,
            expiration_date: self.expiration_date,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require_choice(value: Option<&str>, choices: &[Choice]) -> Result<(), ValidationError> {
    match value {
        None => {
            let mut err = ValidationError::new("required");
            err.message = Some("This field is required".into());
            Err(err)
        }
        Some(v) if choices.iter().any(|c| c.value == v) => Ok(()),
        Some(v) => {
            let mut err = ValidationError::new("invalid_choice");
            err.message = Some(
                format!("Select a valid choice. {} is not one of the available choices.", v)
                    .into(),
            );
            Err(err)
        }
    }
}

/// Widget kinds a client renders for form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Date,
    Select,
    Url,
    Checkbox,
}

/// Description of a single form field.
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<&'static [Choice]>,
    pub initial: Value,
}

impl FormField {
    fn new(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            label,
            kind,
            required,
            help_text: None,
            choices: None,
            initial: Value::Null,
        }
    }

    fn help(mut self, text: &'static str) -> Self {
        self.help_text = Some(text);
        self
    }

    fn choices(mut self, choices: &'static [Choice]) -> Self {
        self.choices = Some(choices);
        self
    }

    fn initial(mut self, value: Value) -> Self {
        self.initial = value;
        self
    }
}

/// Form descriptor for a category's add or update page.
#[derive(Debug, Clone, Serialize)]
pub struct NewsFormDescriptor {
    pub category: NewsCategory,
    pub fields: Vec<FormField>,
}

impl NewsFormDescriptor {
    /// Empty add form. `is_active` is offered here only.
    pub fn blank(category: NewsCategory) -> Self {
        let mut fields = Self::common_fields(category);
        fields.push(
            FormField::new("is_active", "Active", FieldKind::Checkbox, false).initial(json!(true)),
        );
        Self { category, fields }
    }

    /// Update form prefilled from an existing item.
    pub fn for_item(item: &NewsItem) -> Self {
        let fields = Self::common_fields(item.category)
            .into_iter()
            .map(|field| {
                let initial = match field.name {
                    "title" => json!(item.title),
                    "content" => json!(item.content),
                    "news_type" => json!(item.news_type),
                    "affected_element" => json!(item.affected_element),
                    "external_url" => json!(item.external_url),
                    "effective_date" => json!(item.effective_date),
                    "expiration_date" => json!(item.expiration_date),
                    _ => Value::Null,
                };
                field.initial(initial)
            })
            .collect();
        Self {
            category: item.category,
            fields,
        }
    }

    fn common_fields(category: NewsCategory) -> Vec<FormField> {
        let mut fields = vec![
            FormField::new("title", "Subject", FieldKind::Text, true),
            FormField::new("content", "News Content", FieldKind::Textarea, true).help(CONTENT_HELP),
        ];

        match category {
            NewsCategory::Integration => {
                fields.push(
                    FormField::new("news_type", "Integration News Type", FieldKind::Select, true)
                        .choices(INTEGRATION_NEWS_TYPES),
                );
                fields.push(
                    FormField::new("affected_element", "Affected Element", FieldKind::Select, true)
                        .choices(AFFECTED_ELEMENTS),
                );
            }
            NewsCategory::Access => {
                fields.push(
                    FormField::new("external_url", "External URL", FieldKind::Url, false)
                        .help("Link to external news article"),
                );
            }
            NewsCategory::SystemStatus | NewsCategory::Resource => {}
        }

        fields.push(
            FormField::new("effective_date", "Effective Date", FieldKind::Date, false)
                .help("Date when this news becomes effective"),
        );
        fields.push(
            FormField::new("expiration_date", "Expiration Date", FieldKind::Date, false)
                .help("Date when this news expires (optional)"),
        );
        fields
    }
}

/// Listing page for one category.
#[derive(Debug, Clone, Serialize)]
pub struct NewsListPage {
    pub page: String,
    pub category: NewsCategory,
    pub title: &'static str,
    pub news: Vec<NewsItem>,
}

/// Add/update form page.
#[derive(Debug, Clone, Serialize)]
pub struct NewsFormPage {
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<NewsItem>,
    pub form: NewsFormDescriptor,
}

/// Result of a successful create or update.
#[derive(Debug, Clone, Serialize)]
pub struct NewsSaved {
    pub message: String,
    pub news: NewsItem,
}
