//! Multipart field assembly for the generation request.
//!
//! The form calls [`crate::host::SketchHost::export`] itself, right before
//! building its payload, and hands the result to [`SubmissionForm::fields`].
//! Field names match what the generation backend reads.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde::Deserialize;

use crate::consts::CANVAS_DATA_FIELD;
use crate::snapshot::SketchSnapshot;

/// Ordered `(name, value)` pairs for a multipart body.
pub type FormFields = Vec<(&'static str, String)>;

/// Error returned by [`SubmissionForm::fields`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The description is blank.
    #[error("a project description is required")]
    EmptyPrompt,
    /// Auto-deploy was requested without a username or repository name.
    #[error("auto-deploy requires `{0}`")]
    MissingDeployField(&'static str),
}

/// GitHub Pages deployment target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeployTarget {
    pub github_username: String,
    pub repo_name: String,
    /// Optional. When blank the backend deploys with its own token.
    pub github_token: String,
}

/// Everything the user typed into the form, minus the uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub prompt: String,
    pub project_name: String,
    pub figma_url: String,
    pub figma_token: String,
    /// `Some` when the auto-deploy box is checked.
    pub deploy: Option<DeployTarget>,
}

impl SubmissionForm {
    /// Parse a form from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Validate and flatten the form plus `snapshot` into multipart fields.
    ///
    /// Values are trimmed and blank optional fields are left out. `canvas_data`
    /// is always present and is empty when no sketch was drawn.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if the prompt is blank, or if auto-deploy is on and
    /// the username or repository name is blank.
    pub fn fields(&self, snapshot: &SketchSnapshot) -> Result<FormFields, FormError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(FormError::EmptyPrompt);
        }

        let mut fields = vec![("prompt", prompt.to_owned())];
        push_non_empty(&mut fields, "project_name", &self.project_name);
        push_non_empty(&mut fields, "figma_url", &self.figma_url);
        push_non_empty(&mut fields, "figma_token", &self.figma_token);

        if let Some(deploy) = &self.deploy {
            fields.push(("auto_deploy", "on".to_owned()));
            for (name, value) in [("github_username", &deploy.github_username), ("repo_name", &deploy.repo_name)] {
                let value = value.trim();
                if value.is_empty() {
                    return Err(FormError::MissingDeployField(name));
                }
                fields.push((name, value.to_owned()));
            }
            push_non_empty(&mut fields, "github_token", &deploy.github_token);
        }

        fields.push((CANVAS_DATA_FIELD, snapshot.as_str().to_owned()));
        Ok(fields)
    }
}

fn push_non_empty(fields: &mut FormFields, name: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        fields.push((name, value.to_owned()));
    }
}
