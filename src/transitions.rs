//! Transition tables.
//!
//! A hand-written summary of each validator's rules, for display. Nothing here
//! is consulted while validating; when a validator changes, its table here has
//! to be updated by hand.

use serde::Serialize;

use crate::validators::ValidatorKind;

/// One documented rule: in `state`, reading `input` with `stack_top` on the
/// stack, move to `next_state` performing `action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionEntry {
    pub state: &'static str,
    pub input: &'static str,
    pub stack_top: &'static str,
    #[serde(rename = "new_state")]
    pub next_state: &'static str,
    pub action: &'static str,
}

const fn rule(
    state: &'static str,
    input: &'static str,
    stack_top: &'static str,
    next_state: &'static str,
    action: &'static str,
) -> TransitionEntry {
    TransitionEntry {
        state,
        input,
        stack_top,
        next_state,
        action,
    }
}

const FILENAME: &[TransitionEntry] = &[
    rule("q0", "a-z/A-Z/0-9/_", "Z0", "q0", "READ"),
    rule("q0", ".", "Z0", "q_dot", "PUSH ."),
    rule("q0", "@ ? # ! % & *", "Z0", "q_reject", "REJECT (invalid character)"),
    rule("q0", "other", "Z0", "q_reject", "REJECT (character not allowed)"),
    rule("q_dot", "a-z/A-Z/0-9", ".", "q_dot", "READ"),
    rule("q_dot", ".", ".", "q_reject", "REJECT (more than one dot)"),
    rule("q_dot", "other", ".", "q_reject", "REJECT (invalid extension character)"),
    rule("q0", "ε (end)", "Z0", "q_reject", "REJECT (no dot)"),
    rule("q_dot", "ε (allowed extension)", ".", "q_accept", "POP ., ACCEPT"),
    rule("q_dot", "ε (other extension)", ".", "q_reject", "REJECT (extension not allowed)"),
];

const CONTENT: &[TransitionEntry] = &[
    rule("q0", "%PDF", "Z0", "q_accept", "READ x4, ACCEPT (PDF)"),
    rule("q0", "PK", "Z0", "q_accept", "READ x2, ACCEPT (DOCX)"),
    rule("q0", "alphanumeric only", "Z0", "q_accept", "READ x10, ACCEPT (TXT)"),
    rule("q0", "other", "Z0", "q_reject", "REJECT (unrecognized format)"),
];

const FILETYPE: &[TransitionEntry] = &[
    rule("q0", "pdf", "Z0", "q_accept", "ACCEPT (pdf)"),
    rule("q0", "doc/docx", "Z0", "q_accept", "ACCEPT (doc)"),
    rule("q0", "jpg/jpeg/png/gif/bmp", "Z0", "q_accept", "ACCEPT (image)"),
    rule("q0", "xls/xlsx/csv", "Z0", "q_accept", "ACCEPT (spreadsheet)"),
    rule("q0", "txt/text", "Z0", "q_accept", "ACCEPT (text)"),
    rule("q0", "xml/html/htm", "Z0", "q_accept", "ACCEPT (markup)"),
    rule("q0", "json/yaml/yml", "Z0", "q_accept", "ACCEPT (data)"),
    rule("q0", "other", "Z0", "q_reject", "REJECT"),
];

const XML: &[TransitionEntry] = &[
    rule("q0", "<", "*", "q0", "READ (opening tag)"),
    rule("q0", "</", "*", "q0", "READ (closing tag)"),
    rule("q0", "tag_name >", "*", "q_content", "PUSH tag"),
    rule("q_content", "<", "*", "q_content", "READ (opening tag)"),
    rule("q_content", "tag_name >", "*", "q_content", "PUSH tag"),
    rule("q_content", "</ tag_name >", "tag", "q_content", "POP tag"),
    rule("q_content", "</ other >", "tag", "q_reject", "REJECT (mismatch)"),
    rule("q_content", "character", "*", "q_content", "READ (content)"),
    rule("*", "ε (end, tag cut off)", "*", "*", "CHECK (tag dropped)"),
    rule("*", "ε (end)", "Z0", "q_accept", "ACCEPT"),
    rule("*", "ε (end)", "tag", "q_reject", "REJECT (unclosed tags)"),
];

const MULTILEVEL: &[TransitionEntry] = &[
    rule("q0", "< and >", "Z0", "q_xml_parse", "PARSE XML"),
    rule("q_xml_parse", "content", "*", "q_filename_check", "CHECK FILENAME"),
    rule("q_filename_check", "valid filename", "Z0", "q_accept", "ACCEPT"),
    rule("q_filename_check", "invalid filename", "Z0", "q_reject", "REJECT"),
    rule("q_xml_parse", "invalid structure", "*", "q_reject", "REJECT"),
    rule("q_xml_parse", "empty payload", "*", "q_content_check", "CHECK CONTENT"),
    rule("q0", "no tags", "Z0", "q_content_check", "CHECK CONTENT"),
    rule("q_content_check", "known signature", "Z0", "q_accept", "ACCEPT"),
    rule("q_content_check", "other", "Z0", "q_reject", "REJECT"),
];

/// The documented rules of `kind`.
pub fn transition_table(kind: ValidatorKind) -> &'static [TransitionEntry] {
    match kind {
        ValidatorKind::Filename => FILENAME,
        ValidatorKind::Content => CONTENT,
        ValidatorKind::Filetype => FILETYPE,
        ValidatorKind::Xml => XML,
        ValidatorKind::Multilevel => MULTILEVEL,
    }
}

/// The documented rules of the validator called `name`; empty when no
/// validator has that name.
pub fn transition_table_named(name: &str) -> Vec<TransitionEntry> {
    name.parse::<ValidatorKind>()
        .map(|kind| transition_table(kind).to_vec())
        .unwrap_or_default()
}
