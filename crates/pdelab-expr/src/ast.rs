//! Syntax tree and the function whitelist.

use smallvec::SmallVec;

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^` or `**`, right-associative.
    Pow,
}

impl BinOp {
    /// Apply to two operands.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => a / b,
            BinOp::Pow => a.powf(b),
        }
    }
}

/// The callable functions. No other names can be called.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    /// `sin`
    Sin,
    /// `cos`
    Cos,
    /// `tan`
    Tan,
    /// `asin` (also `arcsin`)
    Asin,
    /// `acos` (also `arccos`)
    Acos,
    /// `atan` (also `arctan`)
    Atan,
    /// `sinh`
    Sinh,
    /// `cosh`
    Cosh,
    /// `tanh`
    Tanh,
    /// `exp`
    Exp,
    /// Natural logarithm, `ln` or `log`.
    Ln,
    /// `log10`
    Log10,
    /// `sqrt`
    Sqrt,
    /// `abs`
    Abs,
    /// `floor`
    Floor,
    /// `ceil`
    Ceil,
    /// `min(a, b)` (also `minimum`)
    Min,
    /// `max(a, b)` (also `maximum`)
    Max,
    /// `pow(a, b)` (also `power`)
    Pow,
    /// `atan2(y, x)` (also `arctan2`)
    Atan2,
}

impl Func {
    /// Look up a function by name. The numpy spellings are accepted.
    pub fn from_name(name: &str) -> Option<Func> {
        let f = match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" | "arcsin" => Func::Asin,
            "acos" | "arccos" => Func::Acos,
            "atan" | "arctan" => Func::Atan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "exp" => Func::Exp,
            "ln" | "log" => Func::Ln,
            "log10" => Func::Log10,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "floor" => Func::Floor,
            "ceil" => Func::Ceil,
            "min" | "minimum" => Func::Min,
            "max" | "maximum" => Func::Max,
            "pow" | "power" => Func::Pow,
            "atan2" | "arctan2" => Func::Atan2,
            _ => return None,
        };
        Some(f)
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Log10 => "log10",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Floor => "floor",
            Func::Ceil => "ceil",
            Func::Min => "min",
            Func::Max => "max",
            Func::Pow => "pow",
            Func::Atan2 => "atan2",
        }
    }

    /// Number of arguments.
    pub fn arity(self) -> usize {
        match self {
            Func::Min | Func::Max | Func::Pow | Func::Atan2 => 2,
            _ => 1,
        }
    }

    /// Apply to `args`, which must hold exactly [`arity`](Self::arity)
    /// values.
    pub fn apply(self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Func::Sin => a.sin(),
            Func::Cos => a.cos(),
            Func::Tan => a.tan(),
            Func::Asin => a.asin(),
            Func::Acos => a.acos(),
            Func::Atan => a.atan(),
            Func::Sinh => a.sinh(),
            Func::Cosh => a.cosh(),
            Func::Tanh => a.tanh(),
            Func::Exp => a.exp(),
            Func::Ln => a.ln(),
            Func::Log10 => a.log10(),
            Func::Sqrt => a.sqrt(),
            Func::Abs => a.abs(),
            Func::Floor => a.floor(),
            Func::Ceil => a.ceil(),
            Func::Min => a.min(b),
            Func::Max => a.max(b),
            Func::Pow => a.powf(b),
            Func::Atan2 => a.atan2(b),
        }
    }
}

/// Expression tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Literal or named constant.
    Num(f64),
    /// Variable, by slot in the owning expression's variable list.
    Var(usize),
    /// Unary minus.
    Neg(Box<Node>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Node>,
        /// Right operand.
        rhs: Box<Node>,
    },
    /// Whitelisted function call.
    Call {
        /// Function.
        func: Func,
        /// Arguments; at most two.
        args: SmallVec<[Box<Node>; 2]>,
    },
}

impl Node {
    /// Evaluate with variable slot values `slots`.
    pub fn eval(&self, slots: &[f64]) -> f64 {
        match self {
            Node::Num(v) => *v,
            Node::Var(k) => slots.get(*k).copied().unwrap_or(f64::NAN),
            Node::Neg(n) => -n.eval(slots),
            Node::Binary { op, lhs, rhs } => op.apply(lhs.eval(slots), rhs.eval(slots)),
            Node::Call { func, args } => {
                let vals: SmallVec<[f64; 2]> = args.iter().map(|a| a.eval(slots)).collect();
                func.apply(&vals)
            }
        }
    }

    /// `true` if no variable occurs in this subtree.
    pub fn is_constant(&self) -> bool {
        match self {
            Node::Num(_) => true,
            Node::Var(_) => false,
            Node::Neg(n) => n.is_constant(),
            Node::Binary { lhs, rhs, .. } => lhs.is_constant() && rhs.is_constant(),
            Node::Call { args, .. } => args.iter().all(|a| a.is_constant()),
        }
    }
}
