//! Fixed operator, type and exception mappings.

use pyjs_parser::ast::{BinaryOp, CompareOp, LiteralKind};

/// JavaScript spelling of a comparison operator.
///
/// `in` and `not in` have no infix equivalent and are rewritten to
/// `includes` calls by the expression translator.
pub fn comparison_op(op: CompareOp) -> Option<&'static str> {
    Some(match op {
        CompareOp::Gt => ">",
        CompareOp::Lt => "<",
        CompareOp::Eq => "===",
        CompareOp::NotEq => "!==",
        CompareOp::GtE => ">=",
        CompareOp::LtE => "<=",
        CompareOp::Is => "===",
        CompareOp::IsNot => "!==",
        CompareOp::In | CompareOp::NotIn => return None,
    })
}

/// JavaScript spelling of an infix arithmetic or bitwise operator.
///
/// Floor division maps to plain division, so integer flooring is lost.
/// Exponentiation and matrix multiplication have no infix form here.
pub fn binary_op(op: BinaryOp) -> Option<&'static str> {
    Some(match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div | BinaryOp::FloorDiv => "/",
        BinaryOp::Mod => "%",
        BinaryOp::LeftShift => "<<",
        BinaryOp::RightShift => ">>",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitXor => "^",
        BinaryOp::BitOr => "|",
        BinaryOp::Pow | BinaryOp::MatMul => return None,
    })
}

/// Runtime type tag for a Python type name used as an annotation.
pub fn type_tag(annotation: &str) -> Option<&'static str> {
    match annotation {
        "int" | "float" => Some("Number"),
        "str" => Some("String"),
        "bool" => Some("Boolean"),
        "None" => Some("void"),
        _ => None,
    }
}

/// Python type name and runtime tag of a literal, when it has one.
pub fn literal_type(kind: &LiteralKind<'_>) -> Option<(&'static str, &'static str)> {
    match kind {
        LiteralKind::Int(_) => Some(("int", "Number")),
        LiteralKind::Float(_) => Some(("float", "Number")),
        LiteralKind::Str(_) => Some(("str", "String")),
        LiteralKind::Bool(_) => Some(("bool", "Boolean")),
        LiteralKind::None => Some(("None", "void")),
        LiteralKind::Bytes(_) | LiteralKind::FString(_) | LiteralKind::Ellipsis => None,
    }
}

/// JavaScript constructor standing in for a Python exception class.
pub fn exception_constructor(name: &str) -> &'static str {
    match name {
        "TypeError" => "TypeError",
        "NameError" | "UnboundLocalError" | "ReferenceError" => "ReferenceError",
        "IndexError" => "RangeError",
        "SyntaxError" => "SyntaxError",
        _ => "Error",
    }
}

/// Whether `name` is one of Python's built-in exception classes.
pub fn is_builtin_exception(name: &str) -> bool {
    BUILTIN_EXCEPTIONS.contains(&name)
}

const BUILTIN_EXCEPTIONS: &[&str] = &[
    "ArithmeticError",
    "AssertionError",
    "AttributeError",
    "BaseException",
    "BlockingIOError",
    "BrokenPipeError",
    "BufferError",
    "ChildProcessError",
    "ConnectionAbortedError",
    "ConnectionError",
    "ConnectionRefusedError",
    "ConnectionResetError",
    "EOFError",
    "EnvironmentError",
    "Exception",
    "FileExistsError",
    "FileNotFoundError",
    "FloatingPointError",
    "GeneratorExit",
    "IOError",
    "ImportError",
    "IndentationError",
    "IndexError",
    "InterruptedError",
    "IsADirectoryError",
    "KeyError",
    "KeyboardInterrupt",
    "LookupError",
    "MemoryError",
    "ModuleNotFoundError",
    "NameError",
    "NotADirectoryError",
    "NotImplementedError",
    "OSError",
    "OverflowError",
    "PermissionError",
    "ProcessLookupError",
    "RecursionError",
    "ReferenceError",
    "RuntimeError",
    "StopIteration",
    "SyntaxError",
    "SystemError",
    "SystemExit",
    "TabError",
    "TimeoutError",
    "TypeError",
    "UnboundLocalError",
    "UnicodeDecodeError",
    "UnicodeEncodeError",
    "UnicodeError",
    "ValueError",
    "ZeroDivisionError",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons() {
        assert_eq!(comparison_op(CompareOp::Eq), Some("==="));
        assert_eq!(comparison_op(CompareOp::IsNot), Some("!=="));
        assert_eq!(comparison_op(CompareOp::LtE), Some("<="));
        assert_eq!(comparison_op(CompareOp::In), None);
    }

    #[test]
    fn floor_division_loses_flooring() {
        assert_eq!(binary_op(BinaryOp::FloorDiv), Some("/"));
        assert_eq!(binary_op(BinaryOp::Pow), None);
    }

    #[test]
    fn annotation_tags() {
        assert_eq!(type_tag("int"), type_tag("float"));
        assert_eq!(type_tag("str"), Some("String"));
        assert_eq!(type_tag("None"), Some("void"));
        assert_eq!(type_tag("list"), None);
    }

    #[test]
    fn exception_table() {
        assert_eq!(exception_constructor("TypeError"), "TypeError");
        assert_eq!(exception_constructor("NameError"), "ReferenceError");
        assert_eq!(exception_constructor("UnboundLocalError"), "ReferenceError");
        assert_eq!(exception_constructor("IndexError"), "RangeError");
        assert_eq!(exception_constructor("ValueError"), "Error");
        assert_eq!(exception_constructor("Exception"), "Error");
        assert_eq!(exception_constructor("SomethingElse"), "Error");
        assert!(is_builtin_exception("KeyError"));
        assert!(!is_builtin_exception("Dog"));
    }
}
