use pretty_assertions::assert_eq;
use tessera::{
    error::RuntimeError,
    interpreter::{
        console::{BufferConsole, Console},
        evaluator::core::Context,
        value::{
            class::{ClassInfo, NativeModule},
            core::Value,
            types::TypeValue,
        },
    },
    parse,
};

struct MathModule;

impl NativeModule for MathModule {
    fn describe(&self) -> ClassInfo {
        ClassInfo::new_static("MathLib")
            .with_native_method("square", &[("n", TypeValue::Int)], TypeValue::Int, |args, line| {
                let n = args[0].as_int(line)?;
                n.checked_mul(n).map(Value::Int).ok_or(RuntimeError::Overflow { line })
            })
            .with_native_method("broken", &[], TypeValue::Int, |_, _| Ok(Value::from("nope")))
            .with_constant("ANSWER", Value::Int(42))
    }
}

fn context_with_math() -> (Context, BufferConsole) {
    let console = BufferConsole::new();
    let mut context = Context::with_console(Console::Buffer(console.clone()));
    context.register_module(&MathModule).unwrap();
    (context, console)
}

fn execute(context: &mut Context, src: &str) -> Result<(), RuntimeError> {
    let program = parse(src).unwrap_or_else(|e| panic!("Script failed to parse: {e}\n{src}"));
    context.execute_all(&program)
}

#[test]
fn native_methods_and_constants() {
    let (mut context, console) = context_with_math();
    execute(&mut context, "println(MathLib.square(7)); println(MathLib.ANSWER);").unwrap();
    assert_eq!(console.lines(), vec!["49", "42"]);
}

#[test]
fn native_calls_are_checked() {
    let (mut context, _) = context_with_math();
    assert!(matches!(execute(&mut context, "MathLib.square(\"7\");"),
                     Err(RuntimeError::TypeMismatch { .. })));
    assert!(matches!(execute(&mut context, "MathLib.square(1, 2);"),
                     Err(RuntimeError::ArgumentCountMismatch { .. })));
    assert!(matches!(execute(&mut context, "MathLib.broken();"),
                     Err(RuntimeError::TypeMismatch { .. })));
    assert!(matches!(execute(&mut context, "MathLib.cube(2);"),
                     Err(RuntimeError::UnknownMember { .. })));
    assert!(matches!(execute(&mut context, "MathLib.ANSWER = 1;"),
                     Err(RuntimeError::ConstAssignment { .. })));
    assert!(matches!(execute(&mut context, "new MathLib();"),
                     Err(RuntimeError::StaticInstantiation { .. })));
}

#[test]
fn native_errors_can_be_caught() {
    let (mut context, console) = context_with_math();
    let src = "try { MathLib.square(9223372036854775807); } catch (e: string) { println(\"overflow\"); }";
    execute(&mut context, src).unwrap();
    assert_eq!(console.output(), "overflow\n");
}

#[test]
fn modules_register_once() {
    let (mut context, _) = context_with_math();
    assert!(matches!(context.register_module(&MathModule),
                     Err(RuntimeError::ClassAlreadyDeclared { .. })));
}

#[test]
fn state_persists_between_programs() {
    let console = BufferConsole::new();
    let mut context = Context::with_console(Console::Buffer(console.clone()));

    execute(&mut context, "let total: int = 1; func double(n: int): int => n * 2;").unwrap();
    execute(&mut context, "total = double(total + 1); println(total);").unwrap();
    assert_eq!(console.output(), "4\n");
    assert!(context.functions.contains_key("double"));
    assert!(matches!(execute(&mut context, "func double(n: int): int => n;"),
                     Err(RuntimeError::AlreadyDeclared { .. })));
}

#[test]
fn errors_name_their_line() {
    let (mut context, _) = context_with_math();
    let err = execute(&mut context, "let x: int = 1;\n\nlet y: int = x / 0;").unwrap_err();
    assert_eq!(err.to_string(), "Error on line 3: Division by zero.");
}
