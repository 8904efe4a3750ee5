//! Token stream walker.
//!
//! Groups the flat token/comment sequence into per-physical-line clusters in
//! one forward scan. Comment-only lines are not clusters of their own: they
//! defer onto the next code line, so a comment heading a statement is
//! validated against that statement's expected indent. A trailing run of
//! comment-only lines at end of file is never validated.

use sable_ir::{SourceFile, TokenId};

/// The tokens of one physical line, plus context for validating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    /// All tokens starting on the line, in source order. Non-empty.
    pub tokens: Vec<TokenId>,
    /// Comment tokens from preceding comment-only lines, deferred here.
    pub comments: Vec<TokenId>,
    /// The token immediately preceding `tokens[0]` in the stream, if any.
    pub prev: Option<TokenId>,
}

/// Group the file's token stream into line clusters.
///
/// The result is finite, ordered, and computed eagerly; the walker holds no
/// iteration state of its own.
pub fn line_groups(src: &SourceFile) -> Vec<LineGroup> {
    let mut groups = Vec::new();
    let mut buffer: Vec<TokenId> = Vec::new();
    let mut pending_comments: Vec<TokenId> = Vec::new();
    let mut buffer_prev: Option<TokenId> = None;
    let mut buffer_line = 0u32;
    let mut previous: Option<TokenId> = None;

    for (id, _) in src.tokens().iter() {
        let line = src.line_of(id);
        if !buffer.is_empty() && line != buffer_line {
            flush(src, &mut groups, &mut buffer, &mut pending_comments, buffer_prev);
        }
        if buffer.is_empty() {
            buffer_line = line;
            buffer_prev = previous;
        }
        buffer.push(id);
        previous = Some(id);
    }

    // Final line: yielded only if it contains code. A trailing buffer (and
    // any comments deferred onto it) that is comments-only is discarded.
    if buffer
        .iter()
        .any(|&id| !src.token(id).kind.is_comment())
    {
        groups.push(LineGroup {
            tokens: buffer,
            comments: pending_comments,
            prev: buffer_prev,
        });
    }

    groups
}

fn flush(
    src: &SourceFile,
    groups: &mut Vec<LineGroup>,
    buffer: &mut Vec<TokenId>,
    pending_comments: &mut Vec<TokenId>,
    buffer_prev: Option<TokenId>,
) {
    let all_comments = buffer.iter().all(|&id| src.token(id).kind.is_comment());
    if all_comments {
        pending_comments.append(buffer);
    } else {
        groups.push(LineGroup {
            tokens: std::mem::take(buffer),
            comments: std::mem::take(pending_comments),
            prev: buffer_prev,
        });
    }
}
