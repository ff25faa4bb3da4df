//! Tag stacks
//!
//! Custom tags carry state from an open tag to its matching close tag (and to the tags
//! nested inside it) through a frame pushed at open and popped at close. There is one
//! LIFO stack per tag name, so `table` frames never interfere with `td` frames and
//! differently-named tags can interleave freely.
//!
//! Reporting is left to the caller: [TagStack::pop] returns `None` on underflow and
//! [RenderContext](crate::context::RenderContext) turns that into a diagnostic plus an
//! empty frame.

use crate::params::Parameters;
use std::collections::HashMap;

/// The state captured when a tag opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFrame {
    pub params: Parameters,
    /// 1-based line of the open tag, when known
    pub opened_on: Option<usize>,
}

impl TagFrame {
    pub fn new(params: Parameters, opened_on: Option<usize>) -> Self {
        Self { params, opened_on }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.opened_on.is_none()
    }
}

/// LIFO stack of frames for a single tag name.
#[derive(Debug, Clone, Default)]
pub struct TagStack {
    frames: Vec<TagFrame>,
}

impl TagStack {
    pub fn push(&mut self, frame: TagFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<TagFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&TagFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[TagFrame] {
        &self.frames
    }
}

/// Independent stacks keyed by tag name.
#[derive(Debug, Clone, Default)]
pub struct TagStacks {
    stacks: HashMap<String, TagStack>,
}

impl TagStacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, frame: TagFrame) {
        log::debug!("push {{{}}} (depth {})", name, self.depth(name) + 1);
        self.stacks.entry(name.to_string()).or_default().push(frame);
    }

    pub fn pop(&mut self, name: &str) -> Option<TagFrame> {
        let frame = self.stacks.get_mut(name).and_then(TagStack::pop);
        if frame.is_some() {
            log::debug!("pop {{{}}} (depth {})", name, self.depth(name));
        }
        frame
    }

    pub fn top(&self, name: &str) -> Option<&TagFrame> {
        self.stacks.get(name).and_then(TagStack::top)
    }

    pub fn depth(&self, name: &str) -> usize {
        self.stacks.get(name).map_or(0, TagStack::depth)
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.values().all(TagStack::is_empty)
    }

    /// Every frame still open, ordered by opening line and then tag name.
    pub fn unclosed(&self) -> Vec<(&str, &TagFrame)> {
        let mut open: Vec<_> = self
            .stacks
            .iter()
            .flat_map(|(name, stack)| stack.frames().iter().map(move |f| (name.as_str(), f)))
            .collect();
        open.sort_by(|a, b| a.1.opened_on.cmp(&b.1.opened_on).then(a.0.cmp(b.0)));
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::tokenize;

    fn frame(params: &str) -> TagFrame {
        TagFrame::new(tokenize(params), None)
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = TagStack::default();
        stack.push(frame("id=a"));
        stack.push(frame("id=b"));

        assert_eq!(stack.pop().unwrap().params.get_str("id"), Some("b"));
        assert_eq!(stack.pop().unwrap().params.get_str("id"), Some("a"));
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_top_does_not_remove() {
        let mut stacks = TagStacks::new();
        stacks.push("table", frame("bgcolor=#fff"));

        assert_eq!(
            stacks.top("table").unwrap().params.get_str("bgcolor"),
            Some("#fff")
        );
        assert_eq!(stacks.depth("table"), 1);
    }

    #[test]
    fn test_stacks_are_independent_per_name() {
        let mut stacks = TagStacks::new();
        stacks.push("table", frame("id=t"));
        stacks.push("td", frame("id=d"));

        assert_eq!(stacks.pop("table").unwrap().params.get_str("id"), Some("t"));
        assert_eq!(stacks.depth("td"), 1);
        assert!(stacks.pop("table").is_none());
        assert!(!stacks.is_empty());
        assert!(stacks.pop("td").is_some());
        assert!(stacks.is_empty());
    }

    #[test]
    fn test_missing_stack_reads_as_empty() {
        let mut stacks = TagStacks::new();
        assert!(stacks.top("div").is_none());
        assert!(stacks.pop("div").is_none());
        assert_eq!(stacks.depth("div"), 0);
    }

    #[test]
    fn test_unclosed_ordering() {
        let mut stacks = TagStacks::new();
        stacks.push("td", TagFrame::new(Parameters::new(), Some(2)));
        stacks.push("table", TagFrame::new(Parameters::new(), Some(2)));
        stacks.push("div", TagFrame::new(Parameters::new(), Some(1)));

        let names: Vec<_> = stacks.unclosed().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["div", "table", "td"]);
    }

    #[test]
    fn test_default_frame_is_empty() {
        assert!(TagFrame::default().is_empty());
        assert!(!frame("a=1").is_empty());
    }
}
