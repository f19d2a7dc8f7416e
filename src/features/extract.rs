use super::row::{AlternativeCounts, FeatureRow, FieldValue, RowParams, is_reserved_column};
use crate::error::ExtractionError;
use crate::node::{DecisionKind, DecisionNode};
use serde_json::{Map, Value};

/// Internal disambiguation field of bind parameters, not a training signal.
const BIND_TAG_FIELD: &str = "tag";
/// Per-input flags of a dataflow decision, reduced to their sum.
pub const NOT_TRANSFERABLE_INPUTS_FIELD: &str = "pNotTransferableInputs";

/// Converts a visited node and its siblings into a feature row.
///
/// Siblings sharing the node's own id are ignored. Bind and dataflow nodes must carry
/// their parameters as a mapping whose fields do not clash with the row's own columns;
/// anything else is reported as a contract violation.
pub fn extract<'a, I>(
    node: &DecisionNode,
    siblings: I,
    example: &str,
) -> Result<FeatureRow, ExtractionError>
where
    I: IntoIterator<Item = &'a DecisionNode>,
{
    Ok(FeatureRow {
        example: example.to_string(),
        sid: node.sid().to_string(),
        tag: node.tag().to_string(),
        old_score: node.score(),
        is_terminal: node.is_terminal(),
        alternatives: count_alternatives(node, siblings),
        params: extract_params(node)?,
        label: None,
    })
}

/// Tallies siblings into one bucket per competing decision category.
pub fn count_alternatives<'a, I>(node: &DecisionNode, siblings: I) -> AlternativeCounts
where
    I: IntoIterator<Item = &'a DecisionNode>,
{
    let mut counts = AlternativeCounts::default();
    for sibling in siblings {
        if sibling.sid() == node.sid() {
            continue;
        }
        match sibling.kind() {
            DecisionKind::SingleBind => counts.bindings += 1,
            DecisionKind::GroupBind => counts.group_bindings += 1,
            DecisionKind::Dataflow => counts.dataflows += 1,
            // Roots never compete with other decisions; they count with refactorings.
            DecisionKind::Root | DecisionKind::Refactoring(_) => counts.refactorings += 1,
        }
    }
    counts
}

fn extract_params(node: &DecisionNode) -> Result<RowParams, ExtractionError> {
    match node.kind() {
        DecisionKind::Root => Ok(RowParams::Root),
        DecisionKind::SingleBind | DecisionKind::GroupBind => {
            let fields = params_mapping(node)?
                .iter()
                .filter(|(name, _)| name.as_str() != BIND_TAG_FIELD)
                .map(|(name, value)| {
                    check_column(node, name).map(|()| (name.clone(), FieldValue::from(value)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RowParams::Bind(fields))
        }
        DecisionKind::Dataflow => {
            let params = params_mapping(node)?;
            params.keys().try_for_each(|name| check_column(node, name))?;
            let flags = params
                .get(NOT_TRANSFERABLE_INPUTS_FIELD)
                .ok_or_else(|| ExtractionError::MissingField {
                    sid: node.sid().to_string(),
                    field: NOT_TRANSFERABLE_INPUTS_FIELD,
                })?;
            let not_transferable = sum_flags(node, flags)?;

            let fields = params
                .iter()
                .map(|(name, value)| {
                    let value = if name == NOT_TRANSFERABLE_INPUTS_FIELD {
                        FieldValue::Int(not_transferable)
                    } else {
                        FieldValue::from(value)
                    };
                    (name.clone(), value)
                })
                .collect();
            Ok(RowParams::Dataflow(fields))
        }
        DecisionKind::Refactoring(label) => Ok(RowParams::Refactoring {
            refactoring_type: label.clone(),
        }),
    }
}

fn check_column(node: &DecisionNode, name: &str) -> Result<(), ExtractionError> {
    if is_reserved_column(name) {
        return Err(ExtractionError::ColumnCollision {
            sid: node.sid().to_string(),
            field: name.to_string(),
        });
    }
    Ok(())
}

fn params_mapping(node: &DecisionNode) -> Result<&Map<String, Value>, ExtractionError> {
    node.parameters()
        .as_object()
        .ok_or_else(|| ExtractionError::ParametersNotMapping {
            sid: node.sid().to_string(),
            tag: node.tag().to_string(),
            found: node.parameters().to_string(),
        })
}

fn sum_flags(node: &DecisionNode, flags: &Value) -> Result<i64, ExtractionError> {
    let items = flags
        .as_array()
        .ok_or_else(|| ExtractionError::NotASequence {
            sid: node.sid().to_string(),
            field: NOT_TRANSFERABLE_INPUTS_FIELD,
            found: flags.to_string(),
        })?;

    items.iter().try_fold(0i64, |acc, item| {
        let flag = match item {
            Value::Bool(b) => Some(i64::from(*b)),
            other => other.as_i64(),
        };
        flag.map(|f| acc + f)
            .ok_or_else(|| ExtractionError::NonIntegerFlag {
                sid: node.sid().to_string(),
                field: NOT_TRANSFERABLE_INPUTS_FIELD,
                found: item.to_string(),
            })
    })
}
