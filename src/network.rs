/*
    Network parameters.

    Each supported network is described by a fixed set of constants:
    the Base58Check version bytes, the Bech32 human readable part and
    the WIF private key version. Networks without SegWit carry no
    human readable part and only produce Base58Check addresses.
*/

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    Bitcoin,
    Testnet,
    Litecoin,
    Dogecoin,
    Dash,
    Ravencoin
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network {0:?}")]
pub struct UnknownNetwork(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NetworkParams {
    /// Version byte of P2PKH addresses
    pub pub_key_hash_version: u8,
    /// Version byte of P2SH addresses
    pub script_hash_version: u8,
    /// Bech32 human readable part, `None` on networks without SegWit
    pub bech32_hrp: Option<&'static str>,
    /// Version byte of WIF encoded private keys
    pub private_key_version: u8
}

impl NetworkParams {
    pub const BITCOIN: NetworkParams = NetworkParams {
        pub_key_hash_version: 0x00,
        script_hash_version: 0x05,
        bech32_hrp: Some("bc"),
        private_key_version: 0x80
    };

    pub const TESTNET: NetworkParams = NetworkParams {
        pub_key_hash_version: 0x6f,
        script_hash_version: 0xc4,
        bech32_hrp: Some("tb"),
        private_key_version: 0xef
    };

    pub const LITECOIN: NetworkParams = NetworkParams {
        pub_key_hash_version: 0x30,
        script_hash_version: 0x32,
        bech32_hrp: Some("ltc"),
        private_key_version: 0xb0
    };

    pub const DOGECOIN: NetworkParams = NetworkParams {
        pub_key_hash_version: 0x1e,
        script_hash_version: 0x16,
        bech32_hrp: None,
        private_key_version: 0x9e
    };

    pub const DASH: NetworkParams = NetworkParams {
        pub_key_hash_version: 0x4c,
        script_hash_version: 0x10,
        bech32_hrp: None,
        private_key_version: 0xcc
    };

    pub const RAVENCOIN: NetworkParams = NetworkParams {
        pub_key_hash_version: 0x3c,
        script_hash_version: 0x7a,
        bech32_hrp: None,
        private_key_version: 0x80
    };

    /**
        True when the network has no SegWit and only uses Base58Check addresses.
    */
    pub fn is_legacy_only(&self) -> bool {
        self.bech32_hrp.is_none()
    }
}

impl Network {
    pub fn params(&self) -> NetworkParams {
        match self {
            Network::Bitcoin => NetworkParams::BITCOIN,
            Network::Testnet => NetworkParams::TESTNET,
            Network::Litecoin => NetworkParams::LITECOIN,
            Network::Dogecoin => NetworkParams::DOGECOIN,
            Network::Dash => NetworkParams::DASH,
            Network::Ravencoin => NetworkParams::RAVENCOIN
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "mainnet" | "main" => Ok(Network::Bitcoin),
            "testnet" | "test" => Ok(Network::Testnet),
            "litecoin" => Ok(Network::Litecoin),
            "dogecoin" | "doge" => Ok(Network::Dogecoin),
            "dash" => Ok(Network::Dash),
            "ravencoin" => Ok(Network::Ravencoin),
            _ => Err(UnknownNetwork(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_network_names() {
        assert_eq!("mainnet".parse::<Network>(), Ok(Network::Bitcoin));
        assert_eq!("Bitcoin".parse::<Network>(), Ok(Network::Bitcoin));
        assert_eq!("testnet".parse::<Network>(), Ok(Network::Testnet));
        assert_eq!("litecoin".parse::<Network>(), Ok(Network::Litecoin));
        assert_eq!("Dogecoin".parse::<Network>(), Ok(Network::Dogecoin));
        assert_eq!("dash".parse::<Network>(), Ok(Network::Dash));
        assert_eq!("ravencoin".parse::<Network>(), Ok(Network::Ravencoin));
        assert_eq!("regtest".parse::<Network>(), Err(UnknownNetwork("regtest".to_string())));
    }

    #[test]
    fn params_are_distinct_per_network() {
        let main = Network::Bitcoin.params();
        let test = Network::Testnet.params();

        assert_ne!(main.pub_key_hash_version, test.pub_key_hash_version);
        assert_ne!(main.script_hash_version, test.script_hash_version);
        assert_ne!(main.bech32_hrp, test.bech32_hrp);
        assert_eq!(Network::Litecoin.params().bech32_hrp, Some("ltc"));
    }

    #[test]
    fn legacy_only_networks_have_no_hrp() {
        for network in [Network::Dogecoin, Network::Dash, Network::Ravencoin].iter() {
            assert!(network.params().is_legacy_only());
        }
        assert!(!Network::Bitcoin.params().is_legacy_only());
        assert_eq!(NetworkParams::DOGECOIN.pub_key_hash_version, 0x1e);
        assert_eq!(NetworkParams::DASH.pub_key_hash_version, 0x4c);
        assert_eq!(NetworkParams::RAVENCOIN.pub_key_hash_version, 0x3c);
    }
}
