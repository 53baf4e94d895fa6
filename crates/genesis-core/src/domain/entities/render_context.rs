use std::collections::BTreeMap;

use crate::domain::value_objects::{FeatureFlags, ProjectName, SubProject};

/// Data bound into every template of one generation pass.
///
/// ## Variables
///
/// | Variable      | `name = "billing-api"` | Notes                          |
/// |---------------|------------------------|--------------------------------|
/// | `name`        | `billing-api`          | verbatim                       |
/// | `name_snake`  | `billing_api`          |                                |
/// | `name_kebab`  | `billing-api`          |                                |
/// | `name_pascal` | `BillingApi`           |                                |
/// | `db_name`     | `billing-api`          | `web` / `api` inside a hybrid  |
///
/// ## Flags
///
/// `ai` comes from [`FeatureFlags`]; `hybrid` is set when a [`SubProject`]
/// marker is present.
///
/// Immutable after construction: `within` returns a new context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    name: ProjectName,
    flags: FeatureFlags,
    sub_project: Option<SubProject>,
    variables: BTreeMap<&'static str, String>,
}

impl RenderContext {
    pub const VARIABLES: [&'static str; 5] =
        ["name", "name_snake", "name_kebab", "name_pascal", "db_name"];
    pub const FLAGS: [&'static str; 2] = ["ai", "hybrid"];

    pub fn new(name: ProjectName, flags: FeatureFlags) -> Self {
        Self::build(name, flags, None)
    }

    /// Same project, rendered as one half of a hybrid.
    pub fn within(self, sub_project: SubProject) -> Self {
        Self::build(self.name, self.flags, Some(sub_project))
    }

    fn build(name: ProjectName, flags: FeatureFlags, sub_project: Option<SubProject>) -> Self {
        let raw = name.as_str();
        let db_name = match sub_project {
            Some(sub) => sub.dir_name().to_string(),
            None => raw.to_string(),
        };

        let variables = BTreeMap::from([
            ("name", raw.to_string()),
            ("name_snake", to_snake_case(raw)),
            ("name_kebab", to_kebab_case(raw)),
            ("name_pascal", to_pascal_case(raw)),
            ("db_name", db_name),
        ]);

        Self {
            name,
            flags,
            sub_project,
            variables,
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    pub fn sub_project(&self) -> Option<SubProject> {
        self.sub_project
    }

    pub fn is_hybrid(&self) -> bool {
        self.sub_project.is_some()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Value of a flag usable in `{% if %}`; `None` for undeclared names.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "hybrid" => Some(self.is_hybrid()),
            other => self.flags.get(other),
        }
    }

    /// Every variable and flag as a `tera` context.
    pub fn to_tera(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.variables {
            context.insert(*key, value);
        }
        for flag in Self::FLAGS {
            context.insert(flag, &self.flag(flag).unwrap_or_default());
        }
        context
    }

    /// One context per combination of declared flags. Rendering a body
    /// against all of them evaluates every branch at least once.
    pub fn flag_combinations(name: &ProjectName) -> Vec<Self> {
        [false, true]
            .into_iter()
            .flat_map(|ai| {
                let base = Self::new(name.clone(), FeatureFlags::new().with_ai(ai));
                [base.clone(), base.within(SubProject::Web)]
            })
            .collect()
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split on `_`/`-`, lower→upper transitions and acronym boundaries
/// (`HTTPServer` → `http`, `server`). Words come back lowercased.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            let ends_camel = c.is_lowercase() && next.is_uppercase();
            let ends_acronym = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase());

            if ends_camel || ends_acronym {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
