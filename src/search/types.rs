use super::ranking::SuggestionGroup;
use crate::catalog::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of both select endpoints. `name` is accepted for older clients.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(alias = "name")]
    pub text: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Result of a grouped suggestion query, per category.
#[derive(Debug, Clone)]
pub struct GroupedSuggestions {
    pub text: String,
    pub limit: usize,
    pub groups: BTreeMap<Category, Vec<SuggestionGroup>>,
}

impl GroupedSuggestions {
    pub fn category(&self, category: Category) -> &[SuggestionGroup] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Result of a flat suggestion query.
#[derive(Debug, Clone)]
pub struct FlatSuggestions {
    pub text: String,
    pub limit: usize,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub keys: Vec<i64>,
}

impl From<SuggestionGroup> for GroupResponse {
    fn from(group: SuggestionGroup) -> Self {
        Self {
            name: group.headword,
            keys: group.members,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupedResponse {
    pub find: String,
    pub limit: usize,
    pub sugg_atc: Vec<GroupResponse>,
    /// Always exactly one pooled group.
    pub sugg_inf: Vec<GroupResponse>,
    pub sugg_inn: Vec<GroupResponse>,
    pub sugg_act: Vec<GroupResponse>,
    pub sugg_org: Vec<GroupResponse>,
}

impl From<GroupedSuggestions> for GroupedResponse {
    fn from(mut result: GroupedSuggestions) -> Self {
        let mut take = |category: Category| -> Vec<GroupResponse> {
            result
                .groups
                .remove(&category)
                .unwrap_or_default()
                .into_iter()
                .map(GroupResponse::from)
                .collect()
        };

        Self {
            sugg_atc: take(Category::Code),
            sugg_inf: take(Category::Info),
            sugg_inn: take(Category::RegNumber),
            sugg_act: take(Category::Activity),
            sugg_org: take(Category::Org),
            find: result.text,
            limit: result.limit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlatResponse {
    pub find: String,
    pub limit: usize,
    pub sugg: Vec<String>,
}

impl From<FlatSuggestions> for FlatResponse {
    fn from(result: FlatSuggestions) -> Self {
        Self {
            find: result.text,
            limit: result.limit,
            sugg: result.suggestions,
        }
    }
}
