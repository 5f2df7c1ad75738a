/*
    Library to derive Bitcoin-family addresses from public keys
    and to encode and decode the scripts behind them.

    Supports legacy Base58Check addresses (P2PKH, P2SH, P2WPKH nested in P2SH),
    native SegWit Bech32/Bech32m addresses (P2WPKH, P2WSH, witness v1+),
    and deterministic multisig redeem scripts.

    References:
        - BIP13, BIP16 for legacy script hash addresses
        - BIP67 for deterministic multisig key ordering
        - BIP141, BIP173 and BIP350 for witness programs and their encoding
*/

//Outward facing modules
pub mod address;
pub mod encoding;
pub mod key;
pub mod network;
pub mod prelude;
pub mod script;
pub mod service;

//Modules for internal use
mod hash;
mod impls;
