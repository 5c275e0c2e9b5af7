//! Function entries and their signatures.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use tracing::trace;

use crate::errors;
use crate::object::{Object, ObjectType};

bitflags! {
    /// A set of object types accepted by a parameter or produced by a function.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeSet: u16 {
        const NULL = 1 << 0;
        const BOOLEAN = 1 << 1;
        const INTEGER = 1 << 2;
        const FLOAT = 1 << 3;
        const STRING = 1 << 4;
        const TIME = 1 << 5;
        const MAP = 1 << 6;
        const ARRAY = 1 << 7;
        const ARROW_FUNCTION = 1 << 8;
        const ERROR = 1 << 9;
        const TERMINATE = 1 << 10;

        const NUMBER = Self::INTEGER.bits() | Self::FLOAT.bits();
        const COLLECTION = Self::MAP.bits() | Self::ARRAY.bits();
        /// Plain data: everything except functions and signals.
        const VALUE = Self::NULL.bits()
            | Self::BOOLEAN.bits()
            | Self::NUMBER.bits()
            | Self::STRING.bits()
            | Self::TIME.bits()
            | Self::COLLECTION.bits();
        /// Every type, arrow functions included.
        const ANY = (1 << 11) - 1;
    }
}

impl TypeSet {
    pub const fn of(ty: ObjectType) -> TypeSet {
        match ty {
            ObjectType::Null => TypeSet::NULL,
            ObjectType::Boolean => TypeSet::BOOLEAN,
            ObjectType::Integer => TypeSet::INTEGER,
            ObjectType::Float => TypeSet::FLOAT,
            ObjectType::String => TypeSet::STRING,
            ObjectType::Time => TypeSet::TIME,
            ObjectType::Map => TypeSet::MAP,
            ObjectType::Array => TypeSet::ARRAY,
            ObjectType::ArrowFunction => TypeSet::ARROW_FUNCTION,
            ObjectType::Error => TypeSet::ERROR,
            ObjectType::Terminate => TypeSet::TERMINATE,
        }
    }

    #[inline]
    pub fn accepts(self, object: &Object) -> bool {
        self.contains(TypeSet::of(object.type_of()))
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == TypeSet::ANY {
            return f.write_str("any");
        }
        const NAMES: [(TypeSet, &str); 11] = [
            (TypeSet::NULL, "null"),
            (TypeSet::BOOLEAN, "boolean"),
            (TypeSet::INTEGER, "integer"),
            (TypeSet::FLOAT, "float"),
            (TypeSet::STRING, "string"),
            (TypeSet::TIME, "time"),
            (TypeSet::MAP, "map"),
            (TypeSet::ARRAY, "array"),
            (TypeSet::ARROW_FUNCTION, "function"),
            (TypeSet::ERROR, "error"),
            (TypeSet::TERMINATE, "terminate"),
        ];
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A named parameter or return value with its accepted types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub types: TypeSet,
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, types: TypeSet) -> Self {
        ArgSpec {
            name: name.into(),
            types,
        }
    }
}

bitflags! {
    /// Function attributes.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionAttrs: u8 {
        /// The last parameter's type set covers every trailing argument.
        const VARIADIC = 1 << 0;
    }
}

/// A documentation example: running `program` on `input` yields `output`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example {
    pub input: String,
    pub program: String,
    pub output: String,
}

/// The callable part of an entry.
pub type FunctionImpl = Arc<dyn Fn(&[Object]) -> Object + Send + Sync>;

/// A registered function: signature, documentation and implementation.
#[derive(Clone)]
pub struct FunctionEntry {
    name: String,
    namespace: String,
    description: String,
    args: Vec<ArgSpec>,
    returns: Option<ArgSpec>,
    attrs: FunctionAttrs,
    examples: Vec<Example>,
    tags: Vec<String>,
    func: FunctionImpl,
}

impl FunctionEntry {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Object]) -> Object + Send + Sync + 'static,
    {
        FunctionEntry {
            name: name.into(),
            namespace: super::DEFAULT_NAMESPACE.to_string(),
            description: String::new(),
            args: Vec::new(),
            returns: None,
            attrs: FunctionAttrs::empty(),
            examples: Vec::new(),
            tags: Vec::new(),
            func: Arc::new(func),
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a parameter.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, types: TypeSet) -> Self {
        self.args.push(ArgSpec::new(name, types));
        self
    }

    #[must_use]
    pub fn returns(mut self, name: impl Into<String>, types: TypeSet) -> Self {
        self.returns = Some(ArgSpec::new(name, types));
        self
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.attrs |= FunctionAttrs::VARIADIC;
        self
    }

    #[must_use]
    pub fn example(
        mut self,
        input: impl Into<String>,
        program: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.examples.push(Example {
            input: input.into(),
            program: program.into(),
            output: output.into(),
        });
        self
    }

    #[must_use]
    pub fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|t| (*t).to_string()));
        self
    }

    pub(super) fn set_namespace(&mut self, namespace: String) {
        self.namespace = namespace;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn return_spec(&self) -> Option<&ArgSpec> {
        self.returns.as_ref()
    }

    pub fn attrs(&self) -> FunctionAttrs {
        self.attrs
    }

    pub fn is_variadic(&self) -> bool {
        self.attrs.contains(FunctionAttrs::VARIADIC)
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Check the arguments against the signature, run the function and
    /// check its result.
    ///
    /// Signature violations come back as `Object::Error`, exactly like an
    /// error raised by the function itself.
    pub fn call(&self, args: &[Object]) -> Object {
        if let Err(error) = self.check_args(args) {
            return error.into();
        }
        trace!(function = %self.name, args = args.len(), "calling");
        let result = (self.func)(args);
        if matches!(result, Object::Error(_) | Object::Terminate { .. }) {
            return result;
        }
        match &self.returns {
            Some(spec) if !spec.types.accepts(&result) => {
                errors::invalid_return_type(&self.name, result.type_of()).into()
            }
            _ => result,
        }
    }

    fn check_args(&self, args: &[Object]) -> Result<(), crate::RuntimeError> {
        let declared = self.args.len();
        if args.len() < declared {
            return Err(errors::too_few_arguments(&self.name, declared, args.len()));
        }
        if args.len() > declared && !self.is_variadic() {
            return Err(errors::too_many_arguments(&self.name, declared, args.len()));
        }
        for (i, arg) in args.iter().enumerate() {
            // Trailing variadic arguments share the last parameter's spec.
            let Some(spec) = self.args.get(i).or_else(|| self.args.last()) else {
                continue;
            };
            if !spec.types.accepts(arg) {
                return Err(errors::invalid_argument_type(
                    &self.name,
                    &spec.name,
                    arg.type_of(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("args", &self.args)
            .field("returns", &self.returns)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}
