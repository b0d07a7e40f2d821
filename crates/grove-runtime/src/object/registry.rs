//! Class registry
//!
//! Maps class names to factories. The runtime is single-threaded, so the
//! registry lives in thread-local storage and needs no locking.

use super::class::{Class, ClassDescriptor};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Classes backing the built-in tagged values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinClass {
    Object,
    List,
    Map,
    Date,
    Range,
    StringBuffer,
    Pattern,
    Expando,
}

impl BuiltinClass {
    pub const ALL: [BuiltinClass; 8] = [
        BuiltinClass::Object,
        BuiltinClass::List,
        BuiltinClass::Map,
        BuiltinClass::Date,
        BuiltinClass::Range,
        BuiltinClass::StringBuffer,
        BuiltinClass::Pattern,
        BuiltinClass::Expando,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinClass::Object => super::class::OBJECT_CLASS,
            BuiltinClass::List => "java.util.ArrayList",
            BuiltinClass::Map => "java.util.LinkedHashMap",
            BuiltinClass::Date => "java.util.Date",
            BuiltinClass::Range => "groovy.lang.IntRange",
            BuiltinClass::StringBuffer => "java.lang.StringBuffer",
            BuiltinClass::Pattern => "java.util.regex.Pattern",
            BuiltinClass::Expando => "groovy.util.Expando",
        }
    }

    pub fn class(self) -> Rc<Class> {
        BUILTINS.with(|builtins| builtins.get(self))
    }

    pub fn descriptor(self) -> Rc<ClassDescriptor> {
        Rc::clone(self.class().descriptor())
    }
}

struct Builtins {
    classes: HashMap<BuiltinClass, Rc<Class>>,
    root: Rc<Class>,
}

impl Builtins {
    fn new() -> Self {
        let root = Class::root();
        let classes = BuiltinClass::ALL
            .iter()
            .map(|&builtin| {
                let class = match builtin {
                    BuiltinClass::Object => Rc::clone(&root),
                    other => Class::bare(other.name(), &root),
                };
                (builtin, class)
            })
            .collect();
        Self { classes, root }
    }

    fn get(&self, builtin: BuiltinClass) -> Rc<Class> {
        self.classes
            .get(&builtin)
            .cloned()
            .unwrap_or_else(|| Rc::clone(&self.root))
    }
}

thread_local! {
    static BUILTINS: Builtins = Builtins::new();
    static REGISTRY: RefCell<HashMap<String, Rc<Class>>> = RefCell::new(
        BuiltinClass::ALL
            .iter()
            .map(|&b| (b.name().to_string(), b.class()))
            .collect(),
    );
}

/// Name-to-class mapping for the current thread
pub struct ClassRegistry;

impl ClassRegistry {
    /// Register a class under its name, returning the class it replaced
    pub fn register(class: Rc<Class>) -> Option<Rc<Class>> {
        let name = class.name().to_string();
        let previous = REGISTRY.with(|registry| registry.borrow_mut().insert(name.clone(), class));
        if previous.is_some() {
            warn!(class = %name, "class re-registered, replacing previous definition");
        } else {
            debug!(class = %name, "class registered");
        }
        previous
    }

    pub fn lookup(name: &str) -> Option<Rc<Class>> {
        REGISTRY.with(|registry| registry.borrow().get(name).cloned())
    }

    pub fn contains(name: &str) -> bool {
        REGISTRY.with(|registry| registry.borrow().contains_key(name))
    }

    /// Registered names, sorted
    pub fn class_names() -> Vec<String> {
        let mut names: Vec<String> =
            REGISTRY.with(|registry| registry.borrow().keys().cloned().collect());
        names.sort();
        names
    }
}
