//! Well-formedness checking for fetched row fragments.
//!
//! The widget splices endpoint responses straight into a row element.
//! An unbalanced fragment would swallow the remove control, the hidden
//! index field or the rest of the widget, so fragments are tokenized
//! and rejected before composition.  Only tag balance is checked; the
//! fragment's vocabulary is the template author's business.

use std::cell::RefCell;

use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use tendril::StrTendril;

/// Elements which never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

#[derive(Default)]
struct BalanceSink {
    open: RefCell<Vec<String>>,
    problem: RefCell<Option<String>>,
}

impl BalanceSink {
    fn note(&self, problem: String) {
        let mut slot = self.problem.borrow_mut();
        if slot.is_none() {
            *slot = Some(problem);
        }
    }

    fn handle_tag(&self, tag: &Tag) {
        let name: &str = &tag.name;
        match tag.kind {
            TagKind::StartTag => {
                if !tag.self_closing && !VOID_ELEMENTS.contains(&name) {
                    self.open.borrow_mut().push(name.to_string());
                }
            }
            TagKind::EndTag => match self.open.borrow_mut().pop() {
                Some(expected) if expected == name => {}
                Some(expected) => {
                    self.note(format!("</{}> closes <{}>", name, expected));
                }
                None => {
                    self.note(format!("</{}> closes nothing", name));
                }
            },
        }
    }
}

impl TokenSink for BalanceSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(ref tag) = token {
            self.handle_tag(tag);
        }
        TokenSinkResult::Continue
    }
}

/// Check that `fragment` can be spliced into a row without corrupting
/// the surrounding widget markup.
pub(crate) fn check(fragment: &str) -> std::result::Result<(), String> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(fragment));

    let tokenizer = Tokenizer::new(BalanceSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let sink = tokenizer.sink;
    if let Some(problem) = sink.problem.into_inner() {
        widget_trace_quiet!("rejecting fragment: {}", problem);
        return Err(problem);
    }
    if let Some(name) = sink.open.into_inner().pop() {
        widget_trace_quiet!("rejecting fragment: <{}> left open", name);
        return Err(format!("<{}> is never closed", name));
    }
    Ok(())
}
