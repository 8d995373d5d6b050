//! Lazy expression streams.
//!
//! An [`Expr`] is a shared handle to an immutable node: an LFT head plus one
//! memoised tail per argument slot. A tail runs its computation the first
//! time it is read and caches the outcome, error included, so every
//! continuation is evaluated at most once no matter how many consumers share
//! the node.
//!
//! [`cons`] builds a node from a head and a continuation, [`app`] absorbs the
//! heads of a node's arguments into its own head.

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use moebius_types::{ExactError, Lft, Matrix, Tensor, Vector};

type Compute = Box<dyn FnOnce() -> Result<Expr, ExactError>>;

enum ThunkState {
    Pending(Compute),
    Forcing,
    Forced(Result<Expr, ExactError>),
}

struct Thunk(RefCell<ThunkState>);

impl Thunk {
    fn new(compute: impl FnOnce() -> Result<Expr, ExactError> + 'static) -> Self {
        Self(RefCell::new(ThunkState::Pending(Box::new(compute))))
    }

    fn ready(value: Expr) -> Self {
        Self(RefCell::new(ThunkState::Forced(Ok(value))))
    }

    fn force(&self) -> Result<Expr, ExactError> {
        if let ThunkState::Forced(value) = &*self.0.borrow() {
            return value.clone();
        }
        let state = mem::replace(&mut *self.0.borrow_mut(), ThunkState::Forcing);
        let value = match state {
            ThunkState::Pending(compute) => compute(),
            ThunkState::Forced(value) => value,
            ThunkState::Forcing => panic!("stream tail forced while it was being computed"),
        };
        *self.0.borrow_mut() = ThunkState::Forced(value.clone());
        value
    }

    /// Detaches an already computed successor so it can be dropped iteratively.
    fn take_forced(&self) -> Option<Expr> {
        let mut state = self.0.borrow_mut();
        if !matches!(&*state, ThunkState::Forced(Ok(_))) {
            return None;
        }
        match mem::replace(&mut *state, ThunkState::Forcing) {
            ThunkState::Forced(Ok(expr)) => Some(expr),
            _ => None,
        }
    }
}

enum Tails {
    None,
    One(Thunk),
    Two([Thunk; 2]),
}

struct Node {
    head: Lft,
    tails: Tails,
}

impl Node {
    fn take_forced_tails(&self, into: &mut Vec<Expr>) {
        match &self.tails {
            Tails::None => {}
            Tails::One(tail) => into.extend(tail.take_forced()),
            Tails::Two(tails) => into.extend(tails.iter().filter_map(Thunk::take_forced)),
        }
    }
}

// Long forced chains would otherwise drop recursively, one stack frame set
// per node.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_forced_tails(&mut pending);
        while let Some(expr) = pending.pop() {
            if let Ok(node) = Rc::try_unwrap(expr.0) {
                node.take_forced_tails(&mut pending);
            }
        }
    }
}

/// Shared handle to a lazy stream node.
#[derive(Clone)]
pub struct Expr(Rc<Node>);

impl Expr {
    fn from_parts(head: Lft, tails: Tails) -> Self {
        Self(Rc::new(Node { head, tails }))
    }

    /// A terminal node: an exact value with nothing left to absorb.
    #[must_use]
    pub fn vector(v: Vector) -> Self {
        Self::from_parts(Lft::Vector(v), Tails::None)
    }

    /// `head` applied to the stream produced by `tail`.
    pub fn matrix(
        head: Matrix,
        tail: impl FnOnce() -> Result<Expr, ExactError> + 'static,
    ) -> Self {
        Self::from_parts(Lft::Matrix(head), Tails::One(Thunk::new(tail)))
    }

    /// `head` applied to the streams produced by `first` (slot 1) and
    /// `second` (slot 2).
    pub fn tensor(
        head: Tensor,
        first: impl FnOnce() -> Result<Expr, ExactError> + 'static,
        second: impl FnOnce() -> Result<Expr, ExactError> + 'static,
    ) -> Self {
        Self::from_parts(
            Lft::Tensor(head),
            Tails::Two([Thunk::new(first), Thunk::new(second)]),
        )
    }

    #[must_use]
    pub fn matrix_over(head: Matrix, arg: Expr) -> Self {
        Self::from_parts(Lft::Matrix(head), Tails::One(Thunk::ready(arg)))
    }

    #[must_use]
    pub fn tensor_over(head: Tensor, first: Expr, second: Expr) -> Self {
        Self::from_parts(
            Lft::Tensor(head),
            Tails::Two([Thunk::ready(first), Thunk::ready(second)]),
        )
    }

    /// Tensor head with a known first argument and a lazily produced second.
    pub fn tensor_with(
        head: Tensor,
        first: Expr,
        second: impl FnOnce() -> Result<Expr, ExactError> + 'static,
    ) -> Self {
        Self::from_parts(
            Lft::Tensor(head),
            Tails::Two([Thunk::ready(first), Thunk::new(second)]),
        )
    }

    #[must_use]
    pub fn head(&self) -> &Lft {
        &self.0.head
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.0.head.branch()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.0.tails, Tails::None)
    }

    /// The `index`-th continuation (1-based), computed on first access.
    pub fn tail(&self, index: usize) -> Result<Expr, ExactError> {
        match (&self.0.tails, index) {
            (Tails::None, _) => Err(ExactError::UnsupportedOperation(
                "a terminal vector has no tail",
            )),
            (Tails::One(tail) | Tails::Two([tail, _]), 1) | (Tails::Two([_, tail]), 2) => {
                tail.force()
            }
            _ => Err(ExactError::ArityMismatch {
                index,
                arity: self.arity(),
            }),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0.head)
    }
}

/// Builds a node whose tails are `f(1)` (and `f(2)` for a tensor head).
///
/// A vector head yields a terminal node and `f` is never called.
pub fn cons(head: Lft, f: impl Fn(usize) -> Result<Expr, ExactError> + 'static) -> Expr {
    let tails = match head.branch() {
        0 => Tails::None,
        1 => Tails::One(Thunk::new(move || f(1))),
        _ => {
            let first = Rc::new(f);
            let second = Rc::clone(&first);
            Tails::Two([Thunk::new(move || first(1)), Thunk::new(move || second(2))])
        }
    };
    Expr::from_parts(head, tails)
}

/// Absorbs the heads of the arguments `g(1)` (and `g(2)`) into `lft`.
///
/// Each argument is requested exactly once. The resulting node's tails are
/// the arguments' own tails: slot `i` routes to the first argument while
/// `i` is within its arity, and to the second argument after that.
pub fn app(
    lft: &Lft,
    mut g: impl FnMut(usize) -> Result<Expr, ExactError>,
) -> Result<Expr, ExactError> {
    match lft {
        Lft::Vector(_) => Err(ExactError::UnsupportedOperation(
            "a terminal vector cannot absorb arguments",
        )),
        Lft::Matrix(_) => {
            let arg = g(1)?;
            let head = Lft::dot(1, lft, arg.head())?;
            Ok(cons(head, move |i| arg.tail(i)))
        }
        Lft::Tensor(_) => {
            let first = g(1)?;
            let second = g(2)?;
            let split = first.arity();
            let head = Lft::dot(1, &Lft::dot(2, lft, second.head())?, first.head())?;
            Ok(cons(head, move |i| {
                if i <= split {
                    first.tail(i)
                } else {
                    second.tail(i - split)
                }
            }))
        }
    }
}
