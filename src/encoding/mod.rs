/*
    Module that bundles together the address encoding schemes used in Bitcoin
*/

pub mod base58;
pub mod bech32;
