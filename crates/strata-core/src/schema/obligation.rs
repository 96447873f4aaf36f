use super::derive::Operation;
use super::shape::Shape;

/// Whether a field must supply its own conversion for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obligation {
    /// Values already fit; an identity conversion is used when none is given
    Optional,
    Mandatory,
}

impl Obligation {
    /// Checks an input operation.
    ///
    /// `arg` is the value shape of the declared argument, or `None` when the
    /// operation takes no argument. In that case the resolver is the only
    /// source of values and is always mandatory.
    pub fn for_input(op: Operation, arg: Option<&Shape>, target: &Shape) -> Obligation {
        let Some(arg) = arg else {
            return Obligation::Mandatory;
        };

        if op.resolver_input(arg).is_subtype_of(target) {
            Obligation::Optional
        } else {
            Obligation::Mandatory
        }
    }

    /// Checks an output. The direction is reversed: what storage produces
    /// must be acceptable to the declared output type.
    pub fn for_output(stored: &Shape, accepted: &Shape) -> Obligation {
        if stored.is_subtype_of(accepted) {
            Obligation::Optional
        } else {
            Obligation::Mandatory
        }
    }

    pub fn is_mandatory(self) -> bool {
        self == Obligation::Mandatory
    }
}
