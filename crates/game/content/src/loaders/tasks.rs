//! Task catalog loader.
//!
//! Catalog entries carry a name, a description template, a cost list
//! (`Money` then `People`), optional sub-steps, a duration in turns, a
//! category and a community morale impact. `{m}` and `{p}` in descriptions
//! are replaced with the thousands-separated cost amounts.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use valley_core::state::render_description;
use valley_core::{ResourceCost, ResourceKind, TaskCategory, TaskDefinition};

use crate::loaders::{LoadResult, read_file};

/// On-disk encoding of a task catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `(tasks: [...])`
    Ron,
    /// `[...]` or `{"tasks": [...]}`
    Json,
}

impl CatalogFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            ext if ext.eq_ignore_ascii_case("ron") => Some(Self::Ron),
            ext if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResourceEntry {
    #[serde(rename = "type", alias = "kind")]
    kind: String,
    amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "resource")]
    resources: Vec<ResourceEntry>,
    #[serde(default)]
    steps: Vec<TaskEntry>,
    #[serde(default = "default_time")]
    time: u32,
    #[serde(default, alias = "isSubTask")]
    is_sub_task: bool,
    category: String,
    #[serde(default, alias = "communityMoraleImpact")]
    community_morale_impact: f32,
}

fn default_time() -> u32 {
    1
}

/// Task catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskCatalog {
    tasks: Vec<TaskEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Wrapped(TaskCatalog),
    List(Vec<TaskEntry>),
}

/// Largest magnitude accepted for a single resource amount.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

impl TaskEntry {
    /// Sums the resource list. Only Chance entries may carry negative amounts.
    fn cost(&self, category: TaskCategory) -> LoadResult<ResourceCost> {
        let mut cost = ResourceCost::default();
        for entry in &self.resources {
            let kind = ResourceKind::from_str(&entry.kind)
                .map_err(|_| anyhow::anyhow!("unknown resource type '{}'", entry.kind))?;
            if entry.amount < 0 && !category.is_chance() {
                anyhow::bail!("negative {kind} amount {} on a {category} task", entry.amount);
            }
            let slot = match kind {
                ResourceKind::Money => &mut cost.money,
                ResourceKind::People => &mut cost.people,
            };
            *slot = slot
                .checked_add(entry.amount)
                .filter(|total| total.abs() <= MAX_AMOUNT)
                .ok_or_else(|| anyhow::anyhow!("{kind} amount exceeds {MAX_AMOUNT}"))?;
        }
        Ok(cost)
    }

    fn into_definition(self) -> LoadResult<TaskDefinition> {
        if self.name.trim().is_empty() {
            anyhow::bail!("task without a name");
        }
        let category = TaskCategory::from_str(&self.category)
            .map_err(|_| anyhow::anyhow!("unknown category '{}'", self.category))?;
        let cost = self.cost(category)?;
        let steps = convert_entries(self.steps);

        let mut definition = TaskDefinition::new(self.name, category, cost)
            .with_description(render_description(&self.description, &cost))
            .with_duration(self.time)
            .with_morale_impact(self.community_morale_impact)
            .with_steps(steps);
        definition.is_sub_task = self.is_sub_task;
        Ok(definition)
    }
}

/// Converts entries, dropping (and logging) the ones that cannot be used.
fn convert_entries(entries: Vec<TaskEntry>) -> Vec<TaskDefinition> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let name = entry.name.clone();
            match entry.into_definition() {
                Ok(definition) => Some(definition),
                Err(e) => {
                    tracing::warn!(task = %name, error = %e, "dropping catalog entry");
                    None
                }
            }
        })
        .collect()
}

/// Loader for task catalogs from RON or JSON files.
pub struct TaskLoader;

impl TaskLoader {
    /// Load a task catalog, picking the format from the file extension.
    ///
    /// Fails when the file is missing, cannot be parsed, or yields no usable
    /// task.
    pub fn load(path: &Path) -> LoadResult<Vec<TaskDefinition>> {
        let format = CatalogFormat::from_path(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported task catalog {}: expected a .ron or .json file",
                path.display()
            )
        })?;
        let content = read_file(path)?;
        let tasks = Self::parse(&content, format).map_err(|e| {
            anyhow::anyhow!("Failed to load task catalog {}: {}", path.display(), e)
        })?;
        tracing::debug!(path = %path.display(), count = tasks.len(), "loaded task catalog");
        Ok(tasks)
    }

    /// Parse a task catalog from text in the given format.
    pub fn parse(content: &str, format: CatalogFormat) -> LoadResult<Vec<TaskDefinition>> {
        let entries = match format {
            CatalogFormat::Ron => {
                let catalog: TaskCatalog = ron::from_str(content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse task catalog RON: {}", e))?;
                catalog.tasks
            }
            CatalogFormat::Json => {
                let catalog: JsonCatalog = serde_json::from_str(content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse task catalog JSON: {}", e))?;
                match catalog {
                    JsonCatalog::Wrapped(catalog) => catalog.tasks,
                    JsonCatalog::List(tasks) => tasks,
                }
            }
        };

        let tasks = convert_entries(entries);
        if tasks.is_empty() {
            anyhow::bail!("task catalog contains no usable tasks");
        }
        Ok(tasks)
    }
}
