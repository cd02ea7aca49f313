use tessera::{
    error::RuntimeError,
    interpreter::{
        storage::{class_table::ClassStorage, scope::ScopeStack},
        value::{class::ClassInfo, core::Value, types::TypeValue},
    },
};

#[test]
fn block_frames_share_outer_slots() {
    let mut scopes = ScopeStack::new();
    scopes.declare("count", TypeValue::Int, Value::Int(0), false, 1).unwrap();

    scopes.enter_scope();
    scopes.set("count", Value::Int(1), 2).unwrap();
    scopes.enter_scope();
    scopes.set("count", Value::Int(2), 3).unwrap();
    scopes.exit_scope(4).unwrap();
    scopes.exit_scope(5).unwrap();

    assert_eq!(scopes.get("count", 6).unwrap(), Value::Int(2));
    assert_eq!(scopes.depth(), 1);
}

#[test]
fn shadowing_is_local_to_the_block() {
    let mut scopes = ScopeStack::new();
    scopes.declare("x", TypeValue::Int, Value::Int(1), false, 1).unwrap();

    scopes.enter_scope();
    scopes.declare("x", TypeValue::String, Value::from("inner"), false, 2).unwrap();
    assert_eq!(scopes.get("x", 3).unwrap(), Value::from("inner"));
    assert!(matches!(scopes.declare("x", TypeValue::Int, Value::Int(2), false, 4),
                     Err(RuntimeError::AlreadyDeclared { .. })));
    scopes.exit_scope(5).unwrap();

    assert_eq!(scopes.get("x", 6).unwrap(), Value::Int(1));
}

#[test]
fn isolated_frames_see_nothing() {
    let mut scopes = ScopeStack::new();
    scopes.declare("global", TypeValue::Int, Value::Int(1), false, 1).unwrap();

    scopes.enter_isolated_scope();
    assert!(!scopes.contains("global"));
    assert!(matches!(scopes.get("global", 2), Err(RuntimeError::UnknownVariable { .. })));
    scopes.declare("local", TypeValue::Bool, Value::Bool(true), false, 3).unwrap();
    assert_eq!(scopes.names().collect::<Vec<_>>(), vec!["local"]);
    scopes.exit_scope(4).unwrap();

    assert!(!scopes.contains("local"));
    assert!(scopes.contains("global"));
}

#[test]
fn slots_keep_their_declared_type() {
    let mut scopes = ScopeStack::new();
    scopes.declare("limit", TypeValue::Int, Value::Int(3), true, 1).unwrap();
    scopes.declare("name", TypeValue::String, Value::from("a"), false, 2).unwrap();

    assert!(matches!(scopes.set("limit", Value::Int(4), 3),
                     Err(RuntimeError::ConstAssignment { .. })));
    assert!(matches!(scopes.set("name", Value::Int(4), 4),
                     Err(RuntimeError::TypeMismatch { .. })));
    assert!(matches!(scopes.declare("flag", TypeValue::Bool, Value::Int(0), false, 5),
                     Err(RuntimeError::TypeMismatch { .. })));
    assert!(matches!(scopes.set("missing", Value::Int(0), 6),
                     Err(RuntimeError::UnknownVariable { .. })));
}

#[test]
fn the_global_frame_cannot_be_popped() {
    let mut scopes = ScopeStack::new();
    assert!(matches!(scopes.exit_scope(7), Err(RuntimeError::ScopeUnderflow { line: 7 })));
}

#[test]
fn class_table() {
    let mut classes = ClassStorage::new();
    classes.declare(ClassInfo::new("Point"), 1).unwrap();
    classes.declare(ClassInfo::new_static("Util"), 2).unwrap();

    assert!(classes.contains("Point"));
    assert!(classes.get("Util", 3).unwrap().is_static);
    assert!(classes.find("Line").is_none());
    assert!(matches!(classes.get("Line", 4), Err(RuntimeError::UnknownClass { .. })));
    assert!(matches!(classes.declare(ClassInfo::new("Point"), 5),
                     Err(RuntimeError::ClassAlreadyDeclared { .. })));
    assert_eq!(classes.names().collect::<Vec<_>>(), vec!["Point", "Util"]);
}

#[test]
fn statics_live_in_the_declaring_class() {
    let base = ClassInfo::new("Base").with_constant("LIMIT", Value::Int(10));
    let base = std::rc::Rc::new(base);
    let mut child = ClassInfo::new("Child");
    child.parent = Some(std::rc::Rc::clone(&base));

    assert_eq!(child.static_value("LIMIT"), Some(Value::Int(10)));
    assert!(child.set_static("LIMIT", Value::Int(11)));
    assert_eq!(base.static_value("LIMIT"), Some(Value::Int(11)));
    assert!(!child.set_static("OTHER", Value::Int(0)));
    assert!(child.is_a("Base"));
    assert!(!base.is_a("Child"));
}
