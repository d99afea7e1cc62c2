use anyhow::{Context, Result};
use std::path::Path;

/// A card as written in a deck file, before it gets an id and a stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub question: String,
    pub answer: String,
    pub tags: Vec<String>,
}

/// Load deck entries from a TSV file
/// Format: question<TAB>answer[<TAB>tag1,tag2]
/// Lines starting with # are comments
/// Empty lines are skipped
pub fn load(path: &Path) -> Result<Vec<DeckEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read deck file: {}", path.display()))?;

    parse(&content).with_context(|| format!("Invalid deck file: {}", path.display()))
}

/// Parse TSV deck content
pub fn parse(content: &str) -> Result<Vec<DeckEntry>> {
    let mut entries = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        // Only strip the line ending side, tabs are significant
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.splitn(3, '\t').collect();
        if parts.len() < 2 {
            anyhow::bail!(
                "line {}: expected question<TAB>answer[<TAB>tags]",
                line_num + 1
            );
        }

        let question = parts[0].trim();
        let answer = parts[1].trim();
        if question.is_empty() || answer.is_empty() {
            anyhow::bail!("line {}: question and answer are required", line_num + 1);
        }

        let tags = parts
            .get(2)
            .map(|raw| split_tags(raw))
            .unwrap_or_default();

        entries.push(DeckEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            tags,
        });
    }

    Ok(entries)
}

/// Split a comma separated tag list, dropping blanks
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
