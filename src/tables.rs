//! The lookup tables driving the reader automaton.
//!
//! Every input byte is first mapped onto an [InputClass]. The pair `(State, InputClass)` then
//! indexes the transition table, which yields either a new [State] to enter, an [Action] marking
//! the completion of a token or composite, or a rejection.

/// The coarse category of a single input byte
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum InputClass {
    /// `\t`, `\n` and `\r`
    Whitespace,
    Space,
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    NameSeparator,
    ValueSeparator,
    Quote,
    Backslash,
    Slash,
    Zero,
    /// `1` to `9`
    Digit,
    Decimal,
    Plus,
    Minus,
    LowerA,
    LowerB,
    LowerC,
    LowerD,
    LowerE,
    LowerF,
    LowerL,
    LowerN,
    LowerR,
    LowerS,
    LowerT,
    LowerU,
    /// `A`, `B`, `C`, `D` and `F`
    UpperHex,
    UpperE,
    /// Any other valid character, including all bytes outside of the ASCII range
    Other,
    /// Synthetic input signalling that a completed value sits on top of the value stack
    Value,
    Invalid,
}

/// The states of the reader automaton
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum State {
    /// Expecting the top-level `{` or `[`
    Start,
    /// The top-level container has been closed
    End,
    /// `{` seen, expecting a key or `}`
    ObjectStart,
    /// `,` seen inside an object, expecting a key
    ObjectNext,
    /// Key on the value stack, expecting `:`
    ObjectKey,
    /// `:` seen, expecting a value
    ObjectColon,
    /// Member added, expecting `,` or `}`
    ObjectValue,
    /// `[` seen, expecting a value or `]`
    ArrayStart,
    /// `,` seen inside an array, expecting a value
    ArrayNext,
    /// Element added, expecting `,` or `]`
    ArrayValue,
    StringStart,
    StringChar,
    Escape,
    Unicode0,
    Unicode1,
    Unicode2,
    Unicode3,
    True1,
    True2,
    True3,
    False1,
    False2,
    False3,
    False4,
    Null1,
    Null2,
    Null3,
    Minus,
    Zero,
    NegativeZero,
    Integer,
    IntegerDigits,
    Fraction,
    FractionDigits,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

/// Actions signalling that something has just completed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    /// Insignificant whitespace, stay in the current state
    Whitespace,
    ObjectDone,
    ArrayDone,
    EscapeDone,
    UnicodeDone,
    StringDone,
    TrueDone,
    FalseDone,
    NullDone,
    /// An integral literal ended on the current (non-numeric) input
    IntegerDone,
    /// A literal with a fraction or exponent ended on the current (non-numeric) input
    FloatDone,
}

/// A single cell of the transition table
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Transition {
    Enter(State),
    Act(Action),
    Reject,
}

const CLASS_COUNT: usize = 33;
const STATE_COUNT: usize = 37;

/// Classes for the first 128 byte values
static ASCII_CLASSES: [InputClass; 128] = {
    use InputClass::*;
    [
        Invalid, Invalid, Invalid, Invalid, Invalid, Invalid, Invalid, Invalid,
        Invalid, Whitespace, Whitespace, Invalid, Invalid, Whitespace, Invalid, Invalid,
        Invalid, Invalid, Invalid, Invalid, Invalid, Invalid, Invalid, Invalid,
        Invalid, Invalid, Invalid, Invalid, Invalid, Invalid, Invalid, Invalid,
        Space, Other, Quote, Other, Other, Other, Other, Other,
        Other, Other, Other, Plus, ValueSeparator, Minus, Decimal, Slash,
        Zero, Digit, Digit, Digit, Digit, Digit, Digit, Digit,
        Digit, Digit, NameSeparator, Other, Other, Other, Other, Other,
        Other, UpperHex, UpperHex, UpperHex, UpperHex, UpperE, UpperHex, Other,
        Other, Other, Other, Other, Other, Other, Other, Other,
        Other, Other, Other, Other, Other, Other, Other, Other,
        Other, Other, Other, BeginArray, Backslash, EndArray, Other, Other,
        Other, LowerA, LowerB, LowerC, LowerD, LowerE, LowerF, Other,
        Other, Other, Other, Other, LowerL, Other, LowerN, Other,
        Other, Other, LowerR, LowerS, LowerT, LowerU, Other, Other,
        Other, Other, Other, BeginObject, Other, EndObject, Other, Other,
    ]
};

const __: Transition = Transition::Reject;

const O_: Transition = Transition::Enter(State::ObjectStart);
const O2: Transition = Transition::Enter(State::ObjectNext);
const OK: Transition = Transition::Enter(State::ObjectKey);
const OC: Transition = Transition::Enter(State::ObjectColon);
const OV: Transition = Transition::Enter(State::ObjectValue);
const A_: Transition = Transition::Enter(State::ArrayStart);
const A2: Transition = Transition::Enter(State::ArrayNext);
const AV: Transition = Transition::Enter(State::ArrayValue);
const S_: Transition = Transition::Enter(State::StringStart);
const SC: Transition = Transition::Enter(State::StringChar);
const E_: Transition = Transition::Enter(State::Escape);
const U_: Transition = Transition::Enter(State::Unicode0);
const U1: Transition = Transition::Enter(State::Unicode1);
const U2: Transition = Transition::Enter(State::Unicode2);
const U3: Transition = Transition::Enter(State::Unicode3);
const T_: Transition = Transition::Enter(State::True1);
const TR: Transition = Transition::Enter(State::True2);
const TU: Transition = Transition::Enter(State::True3);
const F_: Transition = Transition::Enter(State::False1);
const FA: Transition = Transition::Enter(State::False2);
const FL: Transition = Transition::Enter(State::False3);
const FS: Transition = Transition::Enter(State::False4);
const N_: Transition = Transition::Enter(State::Null1);
const NU: Transition = Transition::Enter(State::Null2);
const NL: Transition = Transition::Enter(State::Null3);
const MI: Transition = Transition::Enter(State::Minus);
const Z_: Transition = Transition::Enter(State::Zero);
const Z2: Transition = Transition::Enter(State::NegativeZero);
const I_: Transition = Transition::Enter(State::Integer);
const I2: Transition = Transition::Enter(State::IntegerDigits);
const FR: Transition = Transition::Enter(State::Fraction);
const F2: Transition = Transition::Enter(State::FractionDigits);
const EE: Transition = Transition::Enter(State::Exponent);
const ES: Transition = Transition::Enter(State::ExponentSign);
const EV: Transition = Transition::Enter(State::ExponentDigits);

const _W: Transition = Transition::Act(Action::Whitespace);
const _O: Transition = Transition::Act(Action::ObjectDone);
const _A: Transition = Transition::Act(Action::ArrayDone);
const _E: Transition = Transition::Act(Action::EscapeDone);
const _U: Transition = Transition::Act(Action::UnicodeDone);
const _S: Transition = Transition::Act(Action::StringDone);
const _T: Transition = Transition::Act(Action::TrueDone);
const _F: Transition = Transition::Act(Action::FalseDone);
const _N: Transition = Transition::Act(Action::NullDone);
const _I: Transition = Transition::Act(Action::IntegerDone);
const _D: Transition = Transition::Act(Action::FloatDone);

/// Rows follow the declaration order of [State], columns the declaration order of [InputClass].
/// Row labels use the same shorthand as the cells, with `J_` and `_J` for the start and end states
#[rustfmt::skip]
static TRANSITIONS: [[Transition; CLASS_COUNT]; STATE_COUNT] = [
    /*        ws  sp  {   }   [   ]   :   ,   "   \   /   0   19  .   +   -   a   b   c   d   e   f   l   n   r   s   t   u   AF  E   *   DO  __ */
    /* J_ */ [_W, _W, O_, __, A_, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* _J */ [_W, _W, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* O_ */ [_W, _W, __, _O, __, __, __, __, S_, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, OK, __],
    /* O2 */ [_W, _W, __, __, __, __, __, __, S_, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, OK, __],
    /* OK */ [_W, _W, __, __, __, __, OC, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* OC */ [_W, _W, O_, __, A_, __, __, __, S_, __, __, Z_, I_, __, __, MI, __, __, __, __, __, F_, __, N_, __, __, T_, __, __, __, __, OV, __],
    /* OV */ [_W, _W, __, _O, __, __, __, O2, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* A_ */ [_W, _W, O_, __, A_, _A, __, __, S_, __, __, Z_, I_, __, __, MI, __, __, __, __, __, F_, __, N_, __, __, T_, __, __, __, __, AV, __],
    /* A2 */ [_W, _W, O_, __, A_, __, __, __, S_, __, __, Z_, I_, __, __, MI, __, __, __, __, __, F_, __, N_, __, __, T_, __, __, __, __, AV, __],
    /* AV */ [_W, _W, __, __, __, _A, __, A2, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* S_ */ [__, SC, SC, SC, SC, SC, SC, SC, _S, E_, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, __, __],
    /* SC */ [__, SC, SC, SC, SC, SC, SC, SC, _S, E_, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, SC, __, __],
    /* E_ */ [__, __, __, __, __, __, __, __, _E, _E, _E, __, __, __, __, __, __, _E, __, __, __, _E, __, _E, _E, __, _E, U_, __, __, __, __, __],
    /* U_ */ [__, __, __, __, __, __, __, __, __, __, __, U1, U1, __, __, __, U1, U1, U1, U1, U1, U1, __, __, __, __, __, __, U1, U1, __, __, __],
    /* U1 */ [__, __, __, __, __, __, __, __, __, __, __, U2, U2, __, __, __, U2, U2, U2, U2, U2, U2, __, __, __, __, __, __, U2, U2, __, __, __],
    /* U2 */ [__, __, __, __, __, __, __, __, __, __, __, U3, U3, __, __, __, U3, U3, U3, U3, U3, U3, __, __, __, __, __, __, U3, U3, __, __, __],
    /* U3 */ [__, __, __, __, __, __, __, __, __, __, __, _U, _U, __, __, __, _U, _U, _U, _U, _U, _U, __, __, __, __, __, __, _U, _U, __, __, __],
    /* T_ */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, TR, __, __, __, __, __, __, __, __],
    /* TR */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, TU, __, __, __, __, __],
    /* TU */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, _T, __, __, __, __, __, __, __, __, __, __, __, __],
    /* F_ */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, FA, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* FA */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, FL, __, __, __, __, __, __, __, __, __, __],
    /* FL */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, FS, __, __, __, __, __, __, __],
    /* FS */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, _F, __, __, __, __, __, __, __, __, __, __, __, __],
    /* N_ */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, NU, __, __, __, __, __],
    /* NU */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, NL, __, __, __, __, __, __, __, __, __, __],
    /* NL */ [__, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, _N, __, __, __, __, __, __, __, __, __, __],
    /* MI */ [__, __, __, __, __, __, __, __, __, __, __, Z2, I2, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* Z_ */ [_I, _I, __, _I, __, _I, __, _I, __, __, __, __, __, FR, __, __, __, __, __, __, EE, __, __, __, __, __, __, __, __, EE, __, __, __],
    /* Z2 */ [_I, _I, __, _I, __, _I, __, _I, __, __, __, __, __, FR, __, __, __, __, __, __, EE, __, __, __, __, __, __, __, __, EE, __, __, __],
    /* I_ */ [_I, _I, __, _I, __, _I, __, _I, __, __, __, I2, I2, FR, __, __, __, __, __, __, EE, __, __, __, __, __, __, __, __, EE, __, __, __],
    /* I2 */ [_I, _I, __, _I, __, _I, __, _I, __, __, __, I2, I2, FR, __, __, __, __, __, __, EE, __, __, __, __, __, __, __, __, EE, __, __, __],
    /* FR */ [__, __, __, __, __, __, __, __, __, __, __, F2, F2, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* F2 */ [_D, _D, __, _D, __, _D, __, _D, __, __, __, F2, F2, __, __, __, __, __, __, __, EE, __, __, __, __, __, __, __, __, EE, __, __, __],
    /* EE */ [__, __, __, __, __, __, __, __, __, __, __, EV, EV, __, ES, ES, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* ES */ [__, __, __, __, __, __, __, __, __, __, __, EV, EV, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
    /* EV */ [_D, _D, __, _D, __, _D, __, _D, __, __, __, EV, EV, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __],
];

/// Map a single input byte onto its [InputClass]
#[inline]
pub(crate) fn classify(byte: u8) -> InputClass {
    match ASCII_CLASSES.get(byte as usize) {
        Some(class) => *class,
        None => InputClass::Other,
    }
}

/// Look up the transition for a given state and input class
#[inline]
pub(crate) fn transition(state: State, class: InputClass) -> Transition {
    TRANSITIONS[state as usize][class as usize]
}

#[cfg(test)]
mod tests {
    use super::{classify, transition, Action, InputClass, State, Transition};

    #[test]
    fn control_characters_should_be_invalid_except_whitespace() {
        assert_eq!(classify(b'\t'), InputClass::Whitespace);
        assert_eq!(classify(b'\n'), InputClass::Whitespace);
        assert_eq!(classify(b'\r'), InputClass::Whitespace);
        assert_eq!(classify(0x00), InputClass::Invalid);
        assert_eq!(classify(0x0c), InputClass::Invalid);
        assert_eq!(classify(b' '), InputClass::Space);
    }

    #[test]
    fn non_ascii_bytes_should_be_other() {
        assert_eq!(classify(0x7f), InputClass::Other);
        assert_eq!(classify(0x80), InputClass::Other);
        assert_eq!(classify(0xff), InputClass::Other);
    }

    #[test]
    fn letters_should_map_onto_literal_and_hex_classes() {
        assert_eq!(classify(b'E'), InputClass::UpperE);
        assert_eq!(classify(b'F'), InputClass::UpperHex);
        assert_eq!(classify(b'G'), InputClass::Other);
        assert_eq!(classify(b'u'), InputClass::LowerU);
        assert_eq!(classify(b'0'), InputClass::Zero);
        assert_eq!(classify(b'9'), InputClass::Digit);
    }

    #[test]
    fn the_root_must_be_a_container() {
        assert_eq!(
            transition(State::Start, InputClass::BeginObject),
            Transition::Enter(State::ObjectStart)
        );
        assert_eq!(
            transition(State::Start, InputClass::BeginArray),
            Transition::Enter(State::ArrayStart)
        );
        assert_eq!(transition(State::Start, InputClass::Quote), Transition::Reject);
        assert_eq!(transition(State::Start, InputClass::Digit), Transition::Reject);
        assert_eq!(
            transition(State::End, InputClass::Whitespace),
            Transition::Act(Action::Whitespace)
        );
        assert_eq!(transition(State::End, InputClass::BeginArray), Transition::Reject);
    }

    #[test]
    fn completed_values_should_fold_into_their_parents() {
        assert_eq!(
            transition(State::ObjectStart, InputClass::Value),
            Transition::Enter(State::ObjectKey)
        );
        assert_eq!(
            transition(State::ObjectColon, InputClass::Value),
            Transition::Enter(State::ObjectValue)
        );
        assert_eq!(
            transition(State::ArrayNext, InputClass::Value),
            Transition::Enter(State::ArrayValue)
        );
        assert_eq!(transition(State::ObjectValue, InputClass::Value), Transition::Reject);
    }

    #[test]
    fn numbers_should_end_on_delimiters() {
        for state in [State::Zero, State::IntegerDigits, State::ExponentDigits] {
            assert!(matches!(
                transition(state, InputClass::EndArray),
                Transition::Act(Action::IntegerDone) | Transition::Act(Action::FloatDone)
            ));
            assert_eq!(transition(state, InputClass::Quote), Transition::Reject);
        }
        assert_eq!(transition(State::Zero, InputClass::Digit), Transition::Reject);
        assert_eq!(transition(State::Fraction, InputClass::Space), Transition::Reject);
    }

    #[test]
    fn integers_should_accept_an_exponent() {
        for state in [State::Zero, State::NegativeZero, State::Integer, State::IntegerDigits] {
            assert_eq!(
                transition(state, InputClass::LowerE),
                Transition::Enter(State::Exponent)
            );
            assert_eq!(
                transition(state, InputClass::UpperE),
                Transition::Enter(State::Exponent)
            );
        }
    }

    #[test]
    fn strings_should_reject_raw_control_characters() {
        assert_eq!(transition(State::StringChar, InputClass::Whitespace), Transition::Reject);
        assert_eq!(transition(State::StringChar, InputClass::Invalid), Transition::Reject);
        assert_eq!(
            transition(State::StringChar, InputClass::Other),
            Transition::Enter(State::StringChar)
        );
        assert_eq!(transition(State::Escape, InputClass::LowerA), Transition::Reject);
        assert_eq!(
            transition(State::Escape, InputClass::LowerU),
            Transition::Enter(State::Unicode0)
        );
    }
}
