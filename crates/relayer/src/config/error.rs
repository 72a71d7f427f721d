use flex_error::{define_error, TraceError};

use nft_relayer_types::core::host::identifier::ChainId;

define_error! {
    Error {
        Io
            [ TraceError<std::io::Error> ]
            |_| { "config I/O error" },

        Decode
            [ TraceError<toml::de::Error> ]
            |_| { "invalid configuration" },

        Encode
            [ TraceError<toml::ser::Error> ]
            |_| { "invalid configuration" },

        MissingChannelIdentity
            { field: String }
            |e| {
                format!("no `{}` given, set it in the [relay] section or on the command line",
                    e.field)
            },

        SameChain
            { chain_id: ChainId }
            |e| {
                format!("source and destination must be different chains, both are '{}'",
                    e.chain_id)
            },

        ZeroDuration
            { field: String }
            |e| { format!("`{}` must be greater than zero", e.field) },

        InvalidHubAddress
            {
                address: String,
                reason: String,
            }
            |e| { format!("invalid hub address '{}': {}", e.address, e.reason) },

        EmptyField
            { field: String }
            |e| { format!("`{}` must not be empty", e.field) },
    }
}
