use std::time::Duration;
use std::time::Instant;

use anyhow::bail;
use anyhow::Result;

use super::markdown;
use crate::domain::models::MessageBlock;
use crate::domain::models::SlashCommand;

#[cfg(test)]
#[path = "code_blocks_test.rs"]
mod tests;

pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

/// Code blocks of the visible thread, numbered from 1 in display order.
#[derive(Default)]
pub struct CodeBlocks {
    codeblocks: Vec<String>,
}

impl CodeBlocks {
    pub fn replace_from_blocks(&mut self, blocks: &[MessageBlock]) {
        self.codeblocks = blocks
            .iter()
            .flat_map(|block| {
                return markdown::code_blocks(&block.text);
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.codeblocks.len();
    }

    fn parse_index(&self, text: &str) -> Result<usize> {
        let index = text.trim().parse::<usize>()?;
        if index == 0 || index > self.codeblocks.len() {
            bail!(format!("Code block index {index} is not valid"));
        }

        return Ok(index);
    }

    /// Resolves `/copy` arguments such as `2`, `1,3` or `1..3` into code
    /// block numbers.
    pub fn indexes_from_slash_command(&self, command: &SlashCommand) -> Result<Vec<usize>> {
        if self.codeblocks.is_empty() {
            bail!("There are no code blocks in this conversation");
        }

        let mut indexes = vec![];
        for arg in command.args.iter() {
            for e in arg.split(',').filter(|e| return !e.trim().is_empty()) {
                if let Some((first, last)) = e.split_once("..") {
                    let first = self.parse_index(first)?;
                    let last = self.parse_index(last)?;
                    indexes.extend(first..=last);
                } else {
                    indexes.push(self.parse_index(e)?);
                }
            }
        }

        return Ok(indexes);
    }

    pub fn blocks_from_indexes(&self, indexes: &[usize]) -> String {
        return indexes
            .iter()
            .filter_map(|idx| return self.codeblocks.get(idx - 1))
            .map(|e| return e.to_string())
            .collect::<Vec<String>>()
            .join("\n\n");
    }
}

/// Tracks which code blocks show `Copied!` and until when.
#[derive(Default)]
pub struct CopyFeedback {
    indexes: Vec<usize>,
    expires_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn start(&mut self, indexes: Vec<usize>, now: Instant) {
        self.indexes = indexes;
        self.expires_at = Some(now + COPY_FEEDBACK_DURATION);
    }

    pub fn active(&self, now: Instant) -> &[usize] {
        match self.expires_at {
            Some(expires_at) if now < expires_at => return &self.indexes,
            _ => return &[],
        }
    }

    pub fn clear(&mut self) {
        self.indexes = vec![];
        self.expires_at = None;
    }
}
