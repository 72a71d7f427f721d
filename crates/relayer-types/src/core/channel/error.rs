use flex_error::{define_error, TraceError};

define_error! {
    Error {
        InvalidStringAsSequence
            { value: String }
            [ TraceError<core::num::ParseIntError> ]
            | e | {
                format_args!(
                    "String {0} cannot be converted to packet sequence",
                    e.value)
            },

        InvalidCounterEncoding
            { value: Vec<u8> }
            | e | {
                format_args!(
                    "counter value {:?} is not an ASCII decimal integer",
                    String::from_utf8_lossy(&e.value))
            },
    }
}
