//! Layer-management commands: create, delete, rename, show, hide, list.
//!
//! Names are captured from the original text so their case survives.
//! Layer commands get a fixed confidence instead of the weighted estimate.

use mc_protocol::{Operation, Parameters, ParsedCommand};

use crate::classify::CommandFamily;
use crate::error::{InterpretError, InterpretResult};
use crate::extract::Extractor;
use crate::lexicon::{self, LAYER_CREATE_VERBS, LAYER_DELETE_VERBS, LAYER_LIST_WORDS};
use crate::patterns::{LAYER_NAME, NAME_TOKEN, NAMED, QUOTED, RENAME_LAYER_TO, RENAME_TO};

const NAMED_CONFIDENCE: f64 = 0.9;
const LIST_CONFIDENCE: f64 = 0.95;

/// Parse a layer-management instruction of an already classified family.
pub(crate) fn parse_layer_command(
    family: CommandFamily,
    lower: &str,
    original: &str,
    strict: bool,
) -> InterpretResult<ParsedCommand> {
    let named = |operation: Operation, parameters: Parameters| {
        ParsedCommand::new(operation, parameters, NAMED_CONFIDENCE, original)
    };

    match family {
        CommandFamily::Rename => {
            let Some((old_name, new_name)) = find_rename_pair(original) else {
                return Err(missing_name("old_name", original, strict));
            };
            let mut params = Parameters::new();
            params.insert("old_name", old_name);
            params.insert("new_name", new_name);
            Ok(named(Operation::RenameLayer, params))
        }
        CommandFamily::TurnOn | CommandFamily::TurnOff => {
            let name = find_layer_name(original)
                .or_else(|| last_word_name(original))
                .ok_or_else(|| missing_name("name", original, strict))?;
            let operation = if family == CommandFamily::TurnOn {
                Operation::TurnLayerOn
            } else {
                Operation::TurnLayerOff
            };
            let mut params = Parameters::new();
            params.insert("name", name);
            Ok(named(operation, params))
        }
        CommandFamily::Layer => {
            if lexicon::contains_any_word(lower, LAYER_CREATE_VERBS) {
                let name = find_layer_name(original)
                    .ok_or_else(|| missing_name("name", original, strict))?;
                let mut ex = Extractor::new(lower, original, strict);
                let mut params = Parameters::new();
                params.insert("name", name);
                params.insert("color", ex.color());
                params.insert("lineweight", ex.lineweight());
                Ok(named(Operation::CreateLayer, params))
            } else if lexicon::contains_any_word(lower, LAYER_DELETE_VERBS) {
                let name = find_layer_name(original)
                    .ok_or_else(|| missing_name("name", original, strict))?;
                let mut params = Parameters::new();
                params.insert("name", name);
                Ok(named(Operation::DeleteLayer, params))
            } else if lexicon::contains_any_word(lower, LAYER_LIST_WORDS) {
                Ok(ParsedCommand::new(
                    Operation::ListLayers,
                    Parameters::new(),
                    LIST_CONFIDENCE,
                    original,
                ))
            } else {
                Err(InterpretError::ambiguous(
                    original,
                    "cannot determine layer operation",
                ))
            }
        }
        other => Err(InterpretError::ambiguous(
            original,
            format!("{other} is not a layer command"),
        )),
    }
}

fn missing_name(field: &'static str, original: &str, strict: bool) -> InterpretError {
    if strict {
        InterpretError::MissingParameter { field }
    } else {
        tracing::debug!(field, "layer command without a target name");
        InterpretError::ambiguous(original, format!("cannot extract layer {field}"))
    }
}

/// Single layer name: quoted, then `layer [named|called] <name>`, then
/// `named <name>`.
pub(crate) fn find_layer_name(original: &str) -> Option<String> {
    if let Some(caps) = QUOTED.captures(original) {
        return Some(caps[1].to_string());
    }
    let after_layer = LAYER_NAME
        .captures_iter(original)
        .map(|caps| caps[1].to_string())
        .find(|name| !lexicon::is_control_word(name));
    if after_layer.is_some() {
        return after_layer;
    }
    NAMED
        .captures(original)
        .map(|caps| caps[1].to_string())
        .filter(|name| !lexicon::is_control_word(name))
}

/// Last whitespace-delimited token, stripped of trailing punctuation.
fn last_word_name(original: &str) -> Option<String> {
    let word = original
        .split_whitespace()
        .next_back()?
        .trim_end_matches(['.', ',', ';', ':', '!', '?']);
    (NAME_TOKEN.is_match(word) && !lexicon::is_control_word(word)).then(|| word.to_string())
}

/// `(old, new)`: two quoted names, `layer <old> to <new>`, or `<old> to <new>`.
pub(crate) fn find_rename_pair(original: &str) -> Option<(String, String)> {
    let quoted: Vec<&str> = QUOTED
        .captures_iter(original)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .take(2)
        .collect();
    if let [old, new] = quoted.as_slice() {
        return Some((old.to_string(), new.to_string()));
    }

    RENAME_LAYER_TO
        .captures(original)
        .or_else(|| RENAME_TO.captures(original))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}
