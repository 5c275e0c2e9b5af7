//! Path reads and path assignment.
//!
//! Reads are forgiving: a missing key or index, or a segment of the wrong
//! kind on a collection, yields `Null`. Only stepping into a scalar is an
//! error. Writes vivify missing containers and copy shared branches on the
//! way down, so other holders of the old tree never see the change.

use morph_ir::{Ast, ExprId, ExprKind, PathSegment};
use smallvec::SmallVec;

use super::Interpreter;
use crate::arrow::RETURN_NAME;
use crate::errors;
use crate::object::ObjectMap;
use crate::{EvalResult, Object, RuntimeError, Signal};

/// One evaluated step of an assignment target.
#[derive(Clone, Debug, PartialEq)]
enum Step {
    Key(String),
    Index(i64),
}

impl Interpreter<'_> {
    pub(super) fn read_segment(&self, base: &Object, segment: &PathSegment) -> EvalResult {
        match segment {
            PathSegment::Field(name) => read_field(base, name),
            PathSegment::Index(index) => {
                let index = self.eval_expr(*index)?;
                read_index(base, &index)
            }
        }
    }

    /// `set target = value`.
    pub(super) fn assign(&mut self, target: ExprId, value: Object) -> Result<(), Signal> {
        let span = self.ast.expr(target).span;
        let (root, steps) = self.flatten_target(target)?;
        if root == RETURN_NAME {
            self.note_return_write(steps.is_empty());
        }
        let slot = self.env.slot(&root);
        write_path(slot, &steps, value).map_err(|error| Signal::Error(error.with_span(span)))
    }

    /// `set return = v` binds a whole value; `set return.key = v` on an
    /// unbound `return` builds a result record field by field.
    fn note_return_write(&mut self, whole: bool) {
        if whole {
            self.return_by_path = false;
        } else if matches!(self.env.get(RETURN_NAME), None | Some(Object::Null)) {
            self.return_by_path = true;
        }
    }

    /// Split a target into its root identifier and evaluated steps.
    fn flatten_target(&self, target: ExprId) -> Result<(String, SmallVec<[Step; 4]>), Signal> {
        let ast: &Ast = self.ast;
        let mut steps = SmallVec::<[Step; 4]>::new();
        let mut current = target;
        loop {
            match &ast.expr(current).kind {
                ExprKind::Ident(name) => {
                    steps.reverse();
                    return Ok((name.clone(), steps));
                }
                ExprKind::Path { head, segment } => {
                    steps.push(self.eval_step(segment)?);
                    current = *head;
                }
                _ => {
                    return Err(Signal::Error(
                        errors::invalid_assignment_target().with_span(ast.expr(current).span),
                    ))
                }
            }
        }
    }

    fn eval_step(&self, segment: &PathSegment) -> Result<Step, Signal> {
        match segment {
            PathSegment::Field(name) => Ok(Step::Key(name.clone())),
            PathSegment::Index(expr) => match self.eval_expr(*expr)? {
                Object::Integer(i) => Ok(Step::Index(i)),
                Object::String(key) => Ok(Step::Key(key.as_str().to_string())),
                other => Err(Signal::Error(
                    errors::invalid_index_type(other.type_of())
                        .with_span(self.ast.expr(*expr).span),
                )),
            },
        }
    }
}

fn read_field(base: &Object, name: &str) -> EvalResult {
    match base {
        Object::Map(map) => Ok(map.get(name).cloned().unwrap_or(Object::Null)),
        Object::Null | Object::Array(_) => Ok(Object::Null),
        other => Err(errors::cannot_access_field(name, other.type_of()).into()),
    }
}

fn read_index(base: &Object, index: &Object) -> EvalResult {
    match (base, index) {
        (Object::Null, _) | (Object::Map(_) | Object::Array(_), Object::Null) => Ok(Object::Null),
        (Object::Map(map), Object::String(key)) => {
            Ok(map.get(key.as_str()).cloned().unwrap_or(Object::Null))
        }
        (Object::Array(items), Object::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Object::Null)),
        (Object::Map(_), Object::Integer(_)) | (Object::Array(_), Object::String(_)) => {
            Ok(Object::Null)
        }
        (Object::Map(_) | Object::Array(_), other) => {
            Err(errors::invalid_index_type(other.type_of()).into())
        }
        (other, _) => Err(errors::cannot_index(other.type_of()).into()),
    }
}

/// Walk `steps` from `root`, vivifying and copying as needed, then store
/// `value` at the end.
fn write_path(root: &mut Object, steps: &[Step], value: Object) -> Result<(), RuntimeError> {
    let mut current = root;
    for step in steps {
        if current.is_null() {
            *current = match step {
                Step::Key(_) => Object::map(ObjectMap::new()),
                Step::Index(_) => Object::array(Vec::new()),
            };
        }
        current = match (current, step) {
            (Object::Map(map), Step::Key(key)) => {
                map.make_mut().entry(key.clone()).or_insert(Object::Null)
            }
            (Object::Array(items), Step::Index(index)) => {
                let items = items.make_mut();
                let len = items.len();
                let at = usize::try_from(*index).map_err(|_| errors::negative_index(*index))?;
                if at == len {
                    items.push(Object::Null);
                }
                items
                    .get_mut(at)
                    .ok_or_else(|| errors::index_out_of_bounds(*index, len))?
            }
            (other, Step::Key(key)) => {
                return Err(errors::cannot_assign_field(key, other.type_of()));
            }
            (other, Step::Index(_)) => return Err(errors::cannot_assign_index(other.type_of())),
        };
    }
    *current = value;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(entries: &[(&str, Object)]) -> Object {
        Object::map(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn write_vivifies_maps_and_arrays() {
        let mut root = Object::Null;
        let steps = [Step::Key("a".into()), Step::Index(0), Step::Key("b".into())];
        write_path(&mut root, &steps, Object::Integer(1)).unwrap();
        assert_eq!(
            root,
            map(&[("a", Object::array(vec![map(&[("b", Object::Integer(1))])]))])
        );
    }

    #[test]
    fn write_copies_shared_branches() {
        let original = map(&[("a", map(&[("b", Object::Integer(1))]))]);
        let mut copy = original.clone();
        write_path(
            &mut copy,
            &[Step::Key("a".into()), Step::Key("b".into())],
            Object::Integer(2),
        )
        .unwrap();
        assert_eq!(original, map(&[("a", map(&[("b", Object::Integer(1))]))]));
        assert_eq!(copy, map(&[("a", map(&[("b", Object::Integer(2))]))]));
    }

    #[test]
    fn array_writes_append_only_at_length() {
        let mut root = Object::array(vec![Object::Integer(1)]);
        write_path(&mut root, &[Step::Index(1)], Object::Integer(2)).unwrap();
        assert_eq!(root, Object::array(vec![Object::Integer(1), Object::Integer(2)]));

        let error = write_path(&mut root, &[Step::Index(5)], Object::Null).unwrap_err();
        assert_eq!(error.message, "array index 5 out of bounds for length 2");
        let error = write_path(&mut root, &[Step::Index(-1)], Object::Null).unwrap_err();
        assert_eq!(error.message, "negative array index -1");
    }

    #[test]
    fn write_through_scalar_is_an_error() {
        let mut root = Object::Integer(5);
        let error = write_path(&mut root, &[Step::Key("x".into())], Object::Null).unwrap_err();
        assert_eq!(error.message, "cannot assign field `x` on integer");

        let mut root = map(&[]);
        let error = write_path(&mut root, &[Step::Index(0)], Object::Null).unwrap_err();
        assert_eq!(error.message, "cannot assign by index on map");
    }

    #[test]
    fn reads_are_forgiving_on_collections() {
        let array = Object::array(vec![Object::Integer(7)]);
        assert_eq!(read_index(&array, &Object::Integer(0)).unwrap(), Object::Integer(7));
        assert_eq!(read_index(&array, &Object::Integer(3)).unwrap(), Object::Null);
        assert_eq!(read_index(&array, &Object::Integer(-1)).unwrap(), Object::Null);
        assert_eq!(read_index(&array, &Object::string("x")).unwrap(), Object::Null);
        assert_eq!(read_field(&array, "x").unwrap(), Object::Null);
        assert_eq!(read_field(&Object::Null, "x").unwrap(), Object::Null);
        assert!(read_field(&Object::Integer(1), "x").is_err());
        assert!(read_index(&array, &Object::Boolean(true)).is_err());
    }
}
