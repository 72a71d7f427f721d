use flex_error::{define_error, TraceError};

define_error! {
    Error {
        InvalidAmount
            [ TraceError<core::num::ParseIntError> ]
            | _ | { "invalid amount" },

        InvalidCoin
            { coin: String }
            | e | { format_args!("invalid coin: {}", e.coin) },
    }
}
