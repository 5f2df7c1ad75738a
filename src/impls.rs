/**
    This module combines all the boilerplate
    implementations of fmt::Display.
*/

use crate::{
    address,
    key,
    network,
    script
};
use std::fmt;

/*
    key module impls
*/
impl fmt::Display for key::PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

/*
    address module impls
*/
impl fmt::Display for address::Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/*
    network module impls
*/
impl fmt::Display for network::Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Bitcoin => "bitcoin",
            Self::Testnet => "testnet",
            Self::Litecoin => "litecoin",
            Self::Dogecoin => "dogecoin",
            Self::Dash => "dash",
            Self::Ravencoin => "ravencoin"
        };

        write!(f, "{}", name)
    }
}

/*
    script module impls
*/

/// Opcodes by name, pushed data as hex
impl fmt::Display for script::Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, chunk) in self.chunks().iter().enumerate() {
            if i > 0 { f.write_str(" ")?; }
            match self.chunk_data(i) {
                Some(data) => write!(f, "{}", hex::encode(data))?,
                None => write!(f, "{}", chunk.opcode())?
            }
        }
        Ok(())
    }
}
