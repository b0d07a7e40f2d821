//! Class descriptors, class factories and the builder that declares them

use super::instance::Instance;
use super::registry::{BuiltinClass, ClassRegistry};
use crate::convert::to_emulated;
use crate::value::{NativeObject, RuntimeError, RuntimeResult, Value};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Name of the root sentinel every descriptor chain ends in
pub const OBJECT_CLASS: &str = "java.lang.Object";

/// `{name, simple_name, superclass}` record identifying an emulated type.
///
/// Immutable once created; the superclass chain is acyclic because a
/// descriptor can only point at descriptors that already exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    name: String,
    simple_name: String,
    superclass: Option<Rc<ClassDescriptor>>,
}

impl ClassDescriptor {
    /// Create a descriptor; the simple name is the last dotted segment of `name`
    pub fn new(name: &str, superclass: Option<Rc<ClassDescriptor>>) -> Self {
        let simple_name = name.rsplit('.').next().unwrap_or(name).to_string();
        Self {
            name: name.to_string(),
            simple_name,
            superclass,
        }
    }

    /// Create a descriptor whose simple name is given verbatim
    pub fn with_simple_name(
        name: &str,
        simple_name: &str,
        superclass: Option<Rc<ClassDescriptor>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            simple_name: simple_name.to_string(),
            superclass,
        }
    }

    /// The root sentinel (`java.lang.Object`)
    pub fn root() -> Rc<ClassDescriptor> {
        BuiltinClass::Object.descriptor()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn superclass(&self) -> Option<&Rc<ClassDescriptor>> {
        self.superclass.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.superclass.is_none()
    }

    /// Superclass chain, nearest first, ending with the root
    pub fn ancestors(&self) -> Vec<Rc<ClassDescriptor>> {
        let mut chain = Vec::new();
        let mut current = self.superclass.clone();
        while let Some(descriptor) = current {
            current = descriptor.superclass.clone();
            chain.push(descriptor);
        }
        chain
    }

    /// True when this descriptor or one of its ancestors has `name`
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.ancestors().iter().any(|d| d.name == name)
    }
}

/// Method body; receives the instance it was invoked on
pub type Method = Rc<dyn Fn(&Instance, &[Value]) -> RuntimeResult<Value>>;

#[derive(Clone)]
struct FieldDecl {
    name: String,
    class: Option<Rc<Class>>,
}

/// Class factory: descriptor, declared fields, methods and parent class
pub struct Class {
    descriptor: Rc<ClassDescriptor>,
    parent: Option<Rc<Class>>,
    fields: Vec<FieldDecl>,
    methods: IndexMap<String, Method>,
}

impl Class {
    pub(crate) fn root() -> Rc<Class> {
        Rc::new(Class {
            descriptor: Rc::new(ClassDescriptor::new(OBJECT_CLASS, None)),
            parent: None,
            fields: Vec::new(),
            methods: IndexMap::new(),
        })
    }

    /// Class with no members of its own
    pub(crate) fn bare(name: &str, parent: &Rc<Class>) -> Rc<Class> {
        ClassBuilder::new(name).extends(parent).assemble()
    }

    pub fn descriptor(&self) -> &Rc<ClassDescriptor> {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    /// Declared field names, inherited ones first
    pub fn declared_fields(&self) -> Vec<String> {
        let mut names = self
            .parent
            .as_ref()
            .map(|p| p.declared_fields())
            .unwrap_or_default();
        for field in &self.fields {
            if !names.contains(&field.name) {
                names.push(field.name.clone());
            }
        }
        names
    }

    /// Class a declared field converts nested keyed bags into
    pub fn field_class(&self, name: &str) -> Option<Rc<Class>> {
        match self.fields.iter().find(|f| f.name == name) {
            Some(field) => field.class.clone(),
            None => self.parent.as_ref().and_then(|p| p.field_class(name)),
        }
    }

    /// Look a method up on this class, then on its parents
    pub fn find_method(&self, name: &str) -> Option<Method> {
        match self.methods.get(name) {
            Some(method) => Some(Rc::clone(method)),
            None => self.parent.as_ref().and_then(|p| p.find_method(name)),
        }
    }

    /// Default instance: every declared field set to null
    pub fn new_instance(self: &Rc<Self>) -> Instance {
        let instance = Instance::new(Rc::clone(self));
        for name in self.declared_fields() {
            instance.set(&name, Value::Null);
        }
        instance
    }

    /// Construct an instance, optionally merging a keyed bag of field values.
    ///
    /// Every key of the seed is applied, declared or not. Nested native values
    /// are converted to their emulated form.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` if the seed is not a keyed value
    pub fn construct(self: &Rc<Self>, seed: Option<&Value>) -> RuntimeResult<Instance> {
        let instance = self.new_instance();
        match seed {
            None | Some(Value::Null) => {}
            Some(Value::Object(obj)) => self.seed_fields(&instance, obj),
            Some(Value::Map(map)) => {
                for (key, value) in map.entries() {
                    instance.set(&key.to_string(), value);
                }
            }
            Some(Value::Expando(expando)) => {
                for (key, value) in expando.properties() {
                    instance.set(&key, value);
                }
            }
            Some(other) => {
                return Err(RuntimeError::TypeError {
                    msg: format!(
                        "cannot construct {} from {}",
                        self.name(),
                        other.describe_type()
                    ),
                })
            }
        }
        Ok(instance)
    }

    /// Instance seeded from a native keyed bag
    pub(crate) fn instantiate_from(self: &Rc<Self>, obj: &NativeObject) -> Instance {
        let instance = self.new_instance();
        self.seed_fields(&instance, obj);
        instance
    }

    fn seed_fields(&self, instance: &Instance, obj: &NativeObject) {
        for (key, value) in obj.entries() {
            let field_class = self.field_class(&key);
            instance.set(&key, to_emulated(&value, field_class.as_ref()));
        }
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name())
            .field("fields", &self.declared_fields())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Declares a class and registers it
///
/// ```
/// use grove_runtime::{ClassBuilder, Value};
///
/// let point = ClassBuilder::new("Point")
///     .field("x")
///     .field("y")
///     .method("sum", |this, _args| {
///         let x = this.get("x").and_then(|v| v.as_number()).unwrap_or(0.0);
///         let y = this.get("y").and_then(|v| v.as_number()).unwrap_or(0.0);
///         Ok(Value::Number(x + y))
///     })
///     .build();
/// assert_eq!(point.name(), "Point");
/// ```
pub struct ClassBuilder {
    name: String,
    parent: Option<Rc<Class>>,
    fields: Vec<FieldDecl>,
    methods: IndexMap<String, Method>,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            fields: Vec::new(),
            methods: IndexMap::new(),
        }
    }

    /// Set the parent class (defaults to the root)
    pub fn extends(mut self, parent: &Rc<Class>) -> Self {
        self.parent = Some(Rc::clone(parent));
        self
    }

    /// Declare a field
    pub fn field(mut self, name: &str) -> Self {
        self.fields.push(FieldDecl {
            name: name.to_string(),
            class: None,
        });
        self
    }

    /// Declare a field whose keyed-bag values are seeded as instances of `class`
    pub fn typed_field(mut self, name: &str, class: &Rc<Class>) -> Self {
        self.fields.push(FieldDecl {
            name: name.to_string(),
            class: Some(Rc::clone(class)),
        });
        self
    }

    /// Define a method; a later definition with the same name replaces the earlier one
    pub fn method(
        mut self,
        name: &str,
        body: impl Fn(&Instance, &[Value]) -> RuntimeResult<Value> + 'static,
    ) -> Self {
        self.methods.insert(name.to_string(), Rc::new(body));
        self
    }

    /// Build the class and register it under its name
    pub fn build(self) -> Rc<Class> {
        let class = self.assemble();
        ClassRegistry::register(Rc::clone(&class));
        class
    }

    fn assemble(self) -> Rc<Class> {
        let parent = self.parent.unwrap_or_else(|| BuiltinClass::Object.class());
        let descriptor = ClassDescriptor::new(&self.name, Some(Rc::clone(parent.descriptor())));
        Rc::new(Class {
            descriptor: Rc::new(descriptor),
            parent: Some(parent),
            fields: self.fields,
            methods: self.methods,
        })
    }
}

/// Create a bare instance of a new class named `class_name` whose superclass
/// is `base`'s descriptor (the root when `base` is `None`).
///
/// Both the name and the simple name are `class_name` as given; dotted
/// names are not shortened.
pub fn inherit(base: Option<&Rc<Class>>, class_name: &str) -> Instance {
    let parent = match base {
        Some(base) => Rc::clone(base),
        None => BuiltinClass::Object.class(),
    };
    let superclass = Some(Rc::clone(parent.descriptor()));
    let descriptor = ClassDescriptor::with_simple_name(class_name, class_name, superclass);
    let class = Rc::new(Class {
        descriptor: Rc::new(descriptor),
        parent: Some(parent),
        fields: Vec::new(),
        methods: IndexMap::new(),
    });
    class.new_instance()
}
