use crate::action::CompiledAction;
use crate::error::ApplyError;
use serde_json::Value;

/// Runs `actions` against `root` in order.
///
/// Each action's condition is evaluated against `context` first; a false
/// condition skips the action. Returns whether any action changed the
/// document. The first condition error stops the run; mutations made by
/// earlier actions stay in place and are reported through
/// [`ApplyError::changed`].
pub fn apply(
    root: &mut Value,
    actions: &[CompiledAction],
    context: &Value,
) -> Result<bool, ApplyError> {
    let mut changed = false;

    for (index, action) in actions.iter().enumerate() {
        let kind = action.kind();
        let path = action.action().path();

        if let Some(predicate) = action.when() {
            match predicate.evaluate(context) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(
                        index,
                        kind,
                        path = %path,
                        "condition not met, skipping action"
                    );
                    continue;
                }
                Err(source) => {
                    tracing::warn!(
                        index,
                        kind,
                        path = %path,
                        error = %source,
                        "condition evaluation failed"
                    );
                    return Err(ApplyError {
                        index,
                        kind,
                        path: path.to_string(),
                        changed,
                        source,
                    });
                }
            }
        }

        let action_changed = action.action().execute(root);
        tracing::trace!(index, kind, path = %path, changed = action_changed, "applied action");
        changed |= action_changed;
    }

    Ok(changed)
}
