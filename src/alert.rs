//! Alert messages for telling the user what happened after a form submission.
//!
//! Alerts are rendered as fragments that HTMX swaps into the alert container
//! of the page, or directly into the admin space.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Warning,
    Error,
}

impl AlertType {
    fn style(self) -> &'static str {
        match self {
            AlertType::Success => {
                "text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            }
            AlertType::Warning => {
                "text-yellow-800 border-yellow-300 bg-yellow-50 \
                dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800"
            }
            AlertType::Error => {
                "text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            }
        }
    }

    fn icon(self) -> &'static str {
        match self {
            AlertType::Success => "✅",
            AlertType::Warning => "⚠️",
            AlertType::Error => "❌",
        }
    }

    fn role(self) -> &'static str {
        match self {
            AlertType::Success => "status",
            AlertType::Warning | AlertType::Error => "alert",
        }
    }
}

/// An alert with a short message and optional details.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new warning alert without details
    pub fn warning(message: &'a str) -> Self {
        Self {
            alert_type: AlertType::Warning,
            message,
            details: "",
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    /// Create a new error alert without details
    pub fn error_simple(message: &'a str) -> Self {
        Self::error(message, "")
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                role=(self.alert_type.role())
                class={ "flex items-start gap-3 p-4 mb-4 text-sm border rounded-lg " (self.alert_type.style()) }
            {
                span aria-hidden="true" { (self.alert_type.icon()) }

                div
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }
            }
        }
    }

    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}
