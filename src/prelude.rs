/*
    This module contains the default imports for the library.

    Import the library using:
        use btc_address::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{

    key::{
        PubKey,
        KeyError
    },

    address::{
        Address,
        AddressConverter,
        AddressError,
        AddressType,
        HashType,
        Base58Converter,
        SegWitConverter
    },

    encoding::{
        base58::Base58Error,
        bech32::Bech32Err
    },

    network::{
        Network,
        NetworkParams
    },

    script::{
        Script,
        ScriptErr,
        ScriptType,
        MultisigRedeemScript,
        WitnessProgram
    },

    service::{
        AddressService,
        AddressKind
    }

};
