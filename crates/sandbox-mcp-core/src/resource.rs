//! Resource and resource template descriptors.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::handler::ResourceError;

/// A read-only data source addressed by a concrete URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Resource {
    /// Creates a resource after checking that `uri` parses as a URL.
    pub fn new<U, N>(uri: U, name: N) -> Result<Self, ResourceError>
    where
        U: Into<String>,
        N: Into<String>,
    {
        let uri = uri.into();
        Url::parse(&uri).map_err(|e| ResourceError::InvalidUri(format!("{}: {}", uri, e)))?;
        Ok(Self {
            uri,
            name: name.into(),
            title: None,
            description: None,
            mime_type: None,
        })
    }

    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mime_type<M: Into<String>>(mut self, mime_type: M) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A family of resources addressed by a URI pattern with one free
/// variable, e.g. `greeting://{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    pub uri_template: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl ResourceTemplate {
    pub fn new<U, N>(uri_template: U, name: N) -> Self
    where
        U: Into<String>,
        N: Into<String>,
    {
        Self {
            uri_template: uri_template.into(),
            name: name.into(),
            title: None,
            description: None,
            mime_type: None,
        }
    }

    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The payload of a resource read. Every resource in this server
/// resolves to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub text: String,
}

impl ResourceContents {
    pub fn text<T, U>(text: T, uri: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            uri: uri.into(),
            mime_type: Some("text/plain".to_string()),
            text: text.into(),
        }
    }
}
