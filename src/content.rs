//! Page content handed to the page composition.
//!
//! The reveal and scene cores never see this directly: composition only reads counts and
//! labels from it. Content is plain data, usually deserialized from JSON.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContent {
    pub hero: Hero,
    pub experience: Vec<Employer>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub education: Vec<Degree>,
    pub certifications: Vec<Certification>,
    pub awards: Vec<String>,
    pub contact: Vec<ContactLink>,
    pub footer: Footer,
}

impl PageContent {
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub name: String,
    pub headline: String,
    pub tagline: String,
    /// Same-origin link to the downloadable resume.
    pub resume_href: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employer {
    pub company: String,
    pub location: String,
    pub roles: Vec<Role>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    pub title: String,
    pub period: String,
    pub highlights: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub company: String,
    pub description: String,
    pub tech: Vec<String>,
    pub impact: String,
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Degree {
    pub school: String,
    pub degree: String,
    pub period: String,
    pub focus: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub title: String,
    pub issuer: String,
}

/// A `mailto:`, `tel:` or profile link. Entries without `href` are plain text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactLink {
    pub label: String,
    pub value: String,
    pub href: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub lines: Vec<String>,
}
