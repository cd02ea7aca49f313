use std::fs;

use tessera::{
    error::RuntimeError,
    get_result,
    interpreter::{
        console::{BufferConsole, Console},
        evaluator::core::Context,
        module::{MemoryLoader, SourceLoader},
        value::core::Value,
    },
    parse,
};
use walkdir::WalkDir;

/// Runs `src` in a fresh context with a captured console.
fn run(src: &str) -> (Result<(), RuntimeError>, BufferConsole) {
    let program = parse(src).unwrap_or_else(|e| panic!("Script failed to parse: {e}\n{src}"));
    let console = BufferConsole::new();
    let mut context = Context::with_console(Console::Buffer(console.clone()));
    let result = context.execute_all(&program);
    (result, console)
}

fn output_of(src: &str) -> String {
    let (result, console) = run(src);
    if let Err(e) = result {
        panic!("Script failed: {e}\n{src}");
    }
    console.output()
}

fn error_of(src: &str) -> RuntimeError {
    match run(src).0 {
        Ok(()) => panic!("Script succeeded but was expected to fail\n{src}"),
        Err(e) => e,
    }
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn sample_scripts_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "tes"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out")).unwrap_or_default();

        let program = parse(&source).unwrap_or_else(|e| panic!("{path:?} failed to parse: {e}"));
        let console = BufferConsole::new();
        let base = path.parent().map(std::path::Path::to_path_buf).unwrap_or_default();
        let mut context = Context::with_console(Console::Buffer(console.clone()))
                                   .with_loader(SourceLoader::new(base));
        if let Err(e) = context.execute_all(&program) {
            panic!("Script {path:?} failed: {e}");
        }
        assert_eq!(console.output(), expected, "output of {path:?}");
        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn declaration_stores_the_evaluated_value() {
    let mut context = Context::with_console(Console::Buffer(BufferConsole::new()));
    context.execute_all(&parse("let x: int = 2 + 3;").unwrap()).unwrap();
    assert_eq!(context.scopes.get("x", 1).unwrap(), Value::Int(5));
}

#[test]
fn declarations_and_arithmetic() {
    assert_success("let x: int = 1 + 2;");
    assert_success("let x: int = 7 * 9; x = x - 3;");
    assert_success("const greeting: string = \"hi\";");
    assert_success("let d: decimal = 1.25m; let f: float = 0.5f; let g: double = 2.0d;");

    assert_eq!(output_of("println(7 / 2); println(7 % 3); println(-7 / 2);"), "3\n1\n-3\n");
    assert_eq!(output_of("println(0.1m + 0.2m);"), "0.3\n");
    assert_eq!(output_of("println(1.5d * 2.0d);"), "3\n");
    assert_eq!(output_of("println(\"n = \" + str(5));"), "n = 5\n");
    assert_eq!(output_of("println(1 << 4); println(-16 >> 2); println(-1 >>> 60);"),
               "16\n-4\n15\n");
    assert_eq!(output_of("println('a' < 'b'); println(!(1 > 2));"), "true\ntrue\n");
}

#[test]
fn operators_require_matching_types() {
    assert!(matches!(error_of("let x: double = 1 + 1.5d;"), RuntimeError::InvalidOperation { .. }));
    assert!(matches!(error_of("let b: bool = 1 == \"1\";"), RuntimeError::InvalidOperation { .. }));
    assert!(matches!(error_of("if (1) { }"), RuntimeError::ExpectedBoolean { .. }));
}

#[test]
fn arithmetic_errors() {
    assert!(matches!(error_of("let x: int = 1 / 0;"), RuntimeError::DivisionByZero { line: 1 }));
    assert!(matches!(error_of("let x: int = 5 % 0;"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(error_of("let x: int = 9223372036854775807;\nx = x + 1;"),
                     RuntimeError::Overflow { line: 2 }));
}

#[test]
fn declared_types_are_enforced() {
    assert!(matches!(error_of("let x: int = \"a\";"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(error_of("let x: int = 1; x = 1.5d;"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(error_of("const k: int = 1; k = 2;"), RuntimeError::ConstAssignment { .. }));
    assert!(matches!(error_of("let x: int = 1; let x: int = 2;"),
                     RuntimeError::AlreadyDeclared { .. }));
    assert!(matches!(error_of("println(y);"), RuntimeError::UnknownVariable { .. }));
}

#[test]
fn blocks_see_outer_variables() {
    assert_eq!(output_of("let x: int = 1; { x = 2; let y: int = 3; } println(x);"), "2\n");
    assert!(matches!(error_of("{ let y: int = 3; } println(y);"),
                     RuntimeError::UnknownVariable { .. }));
    assert_eq!(output_of("let x: int = 1; { let x: string = \"inner\"; println(x); } println(x);"),
               "inner\n1\n");
}

#[test]
fn functions_do_not_see_callers_variables() {
    let err = error_of("let g: int = 1;\nfunc f(): int => g;\nf();");
    assert!(matches!(err, RuntimeError::UnknownVariable { ref name, .. } if name == "g"));
}

#[test]
fn loops() {
    assert_eq!(output_of("for (let i: int = 0 : i < 3 : i = i + 1) { println(i); }"),
               "0\n1\n2\n");
    assert_eq!(output_of("for (let i: int = 0 : i < 5 : i++) { if (i % 2 == 0) { continue; } \
                          println(i); }"),
               "1\n3\n");
    assert_eq!(output_of("let i: int = 0; while (true) { i += 1; if (i == 4) { break; } } \
                          println(i);"),
               "4\n");
    assert_eq!(output_of("let i: int = 10; do { i++; } while (i < 3); println(i);"), "11\n");
    assert!(matches!(error_of("for (let i: int = 0 : i < 1 : i++) { } println(i);"),
                     RuntimeError::UnknownVariable { .. }));
    assert!(matches!(error_of("let n: int = 0; while (n < 2) { let seen: int = n; n++; } \
                               println(seen);"),
                     RuntimeError::UnknownVariable { .. }));
}

#[test]
fn switch_runs_one_case() {
    let src = "let n: int = 2;
               switch (n) {
                   case 1: println(\"one\");
                   case 2: println(\"two\"); break;
                   case 3: println(\"three\");
                   default: println(\"other\");
               }";
    assert_eq!(output_of(src), "two\n");
    assert_eq!(output_of("switch (\"x\") { case \"y\": println(1); default: println(0); }"),
               "0\n");
}

#[test]
fn functions_and_returns() {
    let src = "func fact(n: int): int {
                   if (n <= 1) { return 1; }
                   return n * fact(n - 1);
               }
               println(fact(10));";
    assert_eq!(output_of(src), "3628800\n");
    assert_eq!(output_of("func square(n: int): int => n * n; println(square(9));"), "81\n");
    assert_eq!(output_of("println(later()); func later(): string => \"hoisted\";"),
               "hoisted\n");

    assert!(matches!(error_of("func f(n: int): int { if (n > 0) { return 1; } } f(0);"),
                     RuntimeError::NotAllPathsReturn { .. }));
    assert!(matches!(error_of("func f(): void { return 1; } f();"),
                     RuntimeError::VoidReturnWithValue { .. }));
    assert!(matches!(error_of("func f(): int => \"no\"; f();"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(error_of("func f(a: int): int => a; f();"),
                     RuntimeError::ArgumentCountMismatch { expected: 1, found: 0, .. }));
    assert!(matches!(error_of("func f(a: int): int => a; f(\"x\");"),
                     RuntimeError::TypeMismatch { .. }));
    assert!(matches!(error_of("missing();"), RuntimeError::UnknownFunction { .. }));
    assert!(matches!(error_of("func print(x: int): void { }"),
                     RuntimeError::BuiltinFunctionRedefinition { .. }));
}

#[test]
fn deep_recursion_stays_within_the_host_stack() {
    let src = "func depth(n: int): int {
                   if (n == 0) { return 0; }
                   return 1 + depth(n - 1);
               }
               println(depth(150));
               println(depth(199));";
    assert_eq!(output_of(src), "150\n199\n");
}

#[test]
fn runaway_recursion_is_reported() {
    let err = error_of("func r(n: int): int => r(n + 1); r(0);");
    assert!(matches!(err, RuntimeError::StackOverflow { depth: 200, .. }));
}

#[test]
fn control_flow_cannot_escape_the_program() {
    assert!(matches!(error_of("break;"),
                     RuntimeError::ControlFlowEscape { keyword: "break", .. }));
    assert!(matches!(error_of("return 1;"),
                     RuntimeError::ControlFlowEscape { keyword: "return", .. }));
    assert!(matches!(error_of("func f(): void { continue; } f();"),
                     RuntimeError::ControlFlowEscape { keyword: "continue", .. }));
}

#[test]
fn arrays() {
    let src = "let a: int[3];
               a[0] = 5;
               println(a);
               println(a.length);
               let names: string[] = [\"x\", \"y\"];
               println(names[1]);
               let empty: int[] = [];
               println(empty.length);
               println(\"hey\"[1]);";
    assert_eq!(output_of(src), "[5, 0, 0]\n3\ny\n0\ne\n");

    assert!(matches!(error_of("let a: int[] = [1, 2, 3]; println(a[3]);"),
                     RuntimeError::IndexOutOfBounds { index: 3, .. }));
    assert!(matches!(error_of("let a: int[] = [1]; a[0] = \"s\";"),
                     RuntimeError::TypeMismatch { .. }));
    assert!(matches!(error_of("let n: int = 2; let a: int[n] = [1, 2, 3];"),
                     RuntimeError::ArraySizeMismatch { .. }));
    assert!(matches!(error_of("let x: int = 5; println(x[0]);"),
                     RuntimeError::NotIndexable { .. }));
    assert!(matches!(error_of("let a: int[] = [1, true];"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn arrays_are_shared_by_reference() {
    let src = "func fill(a: int[]): void { a[0] = 9; }
               let a: int[] = [1, 2];
               let b: int[] = a;
               fill(b);
               println(a[0]);";
    assert_eq!(output_of(src), "9\n");
}

#[test]
fn exceptions() {
    let src = "try { throw \"boom\"; } catch (e: string) { println(e); } finally { println(\"done\"); }";
    assert_eq!(output_of(src), "boom\ndone\n");

    let src = "func fail(): void { throw 42; }
               try { fail(); } catch (e: int) { println(e); }";
    assert_eq!(output_of(src), "42\n");

    let src = "try { let x: int = 1 / 0; } catch (e: string) { println(\"caught\"); }";
    assert_eq!(output_of(src), "caught\n");

    let src = "try {
                   try { throw 1; } catch (e: string) { println(\"inner\"); }
               } catch (e: int) {
                   println(\"outer \" + str(e));
               }";
    assert_eq!(output_of(src), "outer 1\n");

    let src = "func f(): int { try { return 1; } finally { return 2; } }
               println(f());";
    assert_eq!(output_of(src), "2\n");

    let err = error_of("throw \"unhandled\";");
    assert!(matches!(err, RuntimeError::Thrown { .. }));
    assert_eq!(err.to_string(), "Error on line 1: Uncaught exception: unhandled");
}

#[test]
fn ternary_and_short_circuit() {
    assert_eq!(output_of("println(1 < 2 ? \"yes\" : \"no\");"), "yes\n");
    assert_eq!(output_of("let t: bool = false && (1 / 0 == 0); println(t);"), "false\n");
    assert_eq!(output_of("let t: bool = true || (1 / 0 == 0); println(t);"), "true\n");
}

#[test]
fn inheritance_and_constructors() {
    let src = "class Animal {
                   let name: string;
                   constructor(name: string) { this.name = name; }
                   func describe(): string => \"animal \" + name;
               }
               class Dog :: Animal {
                   constructor(name: string) : parent(name) { }
                   func bark(): string => name + \" says woof\";
               }
               let d: Dog = new Dog(\"rex\");
               println(d.describe());
               println(d.bark());
               println(d is Animal);
               let a: Animal = d;
               println(a is Dog);";
    assert_eq!(output_of(src), "animal rex\nrex says woof\ntrue\ntrue\n");

    assert!(matches!(error_of("class C { constructor(a: int) { } } new C();"),
                     RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(error_of("class D { } new D(1);"),
                     RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(error_of("class B :: Missing { }"), RuntimeError::UnknownClass { .. }));
    assert!(matches!(error_of("class A { } class B { } class C :: A, B { }"),
                     RuntimeError::InvalidInheritance { .. }));
}

#[test]
fn methods_call_each_other_implicitly() {
    let src = "class Calc {
                   let base: int = 10;
                   func add(n: int): int => base + n;
                   func twice(n: int): int => add(add(n));
               }
               println(new Calc().twice(1));";
    assert_eq!(output_of(src), "21\n");
}

#[test]
fn static_members() {
    let src = "class Counter {
                   static let count: int = 0;
                   static func increment(): int { count = count + 1; return count; }
               }
               Counter.increment();
               Counter.increment();
               println(Counter.count);";
    assert_eq!(output_of(src), "2\n");

    assert_eq!(output_of("static class Util { func twice(n: int): int => n * 2; } \
                          println(Util.twice(4));"),
               "8\n");
    assert!(matches!(error_of("static class Util { } new Util();"),
                     RuntimeError::StaticInstantiation { .. }));
    assert!(matches!(error_of("class P { let v: int = 1; } println(P.v);"),
                     RuntimeError::InstanceAccess { .. }));
    assert!(matches!(error_of("class W { let v: int = 1; static func get(): int => v; } W.get();"),
                     RuntimeError::InstanceAccess { .. }));
    assert!(matches!(error_of("class Q { static let s: int = 1; } let q: Q = new Q(); println(q.s);"),
                     RuntimeError::StaticAccess { .. }));
}

#[test]
fn private_members() {
    let src = "class A { private let x: int = 1; func get(): int => x; }
               println(new A().get());";
    assert_eq!(output_of(src), "1\n");

    assert!(matches!(error_of("class A { private let x: int = 1; } let a: A = new A(); println(a.x);"),
                     RuntimeError::PrivateAccess { .. }));
    let src = "class E { private func secret(): int => 1; func open(): int => secret(); }
               println(new E().open());
               new E().secret();";
    let (result, console) = run(src);
    assert_eq!(console.output(), "1\n");
    assert!(matches!(result, Err(RuntimeError::PrivateAccess { .. })));
}

#[test]
fn interfaces() {
    let src = "interface Shape { func area(): int; }
               class Square :: Shape { let side: int = 2; func area(): int => side * side; }
               let s: Shape = new Square();
               println(s.area());
               println(s is Shape);";
    assert_eq!(output_of(src), "4\ntrue\n");
    assert!(matches!(error_of("interface Shape { func area(): int; } new Shape();"),
                     RuntimeError::AbstractInstantiation { .. }));
}

#[test]
fn enums() {
    let src = "enum Color { Red, Green = 5, Blue }
               println(Color.Red);
               println(Color.Blue);";
    assert_eq!(output_of(src), "0\n6\n");
    assert!(matches!(error_of("enum Color { Red } Color.Red = 3;"),
                     RuntimeError::ConstAssignment { .. }));
}

#[test]
fn is_checks_types() {
    let src = "class N { let next: N; }
               let n: N = new N();
               println(n.next is void);
               println(n is N);
               println(1 is int);
               println(1 is string);";
    assert_eq!(output_of(src), "true\ntrue\ntrue\nfalse\n");
}

#[test]
fn this_requires_an_instance() {
    assert!(matches!(error_of("println(this);"), RuntimeError::ThisOutsideInstance { .. }));
}

#[test]
fn read_consumes_queued_input() {
    let program = parse("let s: string = read(); println(s + \"!\"); println(read() + \"?\");").unwrap();
    let console = BufferConsole::with_input(&["hello"]);
    let mut context = Context::with_console(Console::Buffer(console.clone()));
    context.execute_all(&program).unwrap();
    assert_eq!(console.lines(), vec!["hello!", "?"]);
}

#[test]
fn includes_run_once() {
    let mut loader = MemoryLoader::new();
    loader.insert("math", "func square(n: int): int => n * n;");
    let console = BufferConsole::new();
    let mut context = Context::with_console(Console::Buffer(console.clone())).with_loader(loader);

    let program = parse("include \"math\"; println(square(4)); use \"math\";").unwrap();
    context.execute_all(&program).unwrap();
    assert_eq!(console.output(), "16\n");

    let program = parse("include \"nowhere\";").unwrap();
    assert!(matches!(context.execute_all(&program), Err(RuntimeError::Include { .. })));
}

#[test]
fn failed_includes_are_retried() {
    let mut loader = MemoryLoader::new();
    loader.insert("faulty", "println(\"loading\"); let broken: int = 1 / 0;");
    let console = BufferConsole::new();
    let mut context = Context::with_console(Console::Buffer(console.clone())).with_loader(loader);

    let src = "try { include \"missing\"; } catch (e) { println(\"caught\"); }
               try { include \"faulty\"; } catch (e) { println(\"caught\"); }
               try { include \"faulty\"; } catch (e) { println(\"caught again\"); }";
    context.execute_all(&parse(src).unwrap()).unwrap();
    assert_eq!(console.output(), "caught\nloading\ncaught\nloading\ncaught again\n");

    let program = parse("include \"missing\";").unwrap();
    assert!(matches!(context.execute_all(&program), Err(RuntimeError::Include { .. })));
}

#[test]
fn syntax_errors_stop_everything() {
    assert_failure("println(1); let x: int = ;");
    assert_failure("let x = 1;");
    assert_failure("let d: double = 1.5;");
    assert_failure("let s: string = \"open;");
}
