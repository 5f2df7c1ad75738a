/*
    Address service.

    Entry point used by wallet code: derives every address variant of a
    public key, validates address strings and derives multisig addresses
    for a network. On networks without SegWit the service runs in legacy
    mode and only Base58Check addresses are produced or accepted.
*/

use crate::{
    address::{
        Address,
        AddressConverter,
        AddressError,
        Base58Converter,
        SegWitConverter
    },
    key::PubKey,
    network::{Network, NetworkParams},
    script::{MultisigRedeemScript, ScriptType}
};
use log::debug;

/// Which single address to derive from a public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Native SegWit (P2WPKH), Base58Check on legacy only networks
    Default,
    /// Base58Check (P2PKH)
    Legacy
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressService {
    params: NetworkParams,
    segwit: Option<AddressConverter>,
    legacy: AddressConverter
}

impl AddressService {
    pub fn new(network: Network) -> Self {
        Self::with_params(network.params())
    }

    pub fn with_params(params: NetworkParams) -> Self {
        Self {
            params,
            segwit: SegWitConverter::for_network(&params).map(AddressConverter::SegWit),
            legacy: AddressConverter::Base58(Base58Converter::new(&params))
        }
    }

    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// True when the network has no SegWit converter
    pub fn is_legacy_only(&self) -> bool {
        self.segwit.is_none()
    }

    /**
        Returns the SegWit and the legacy address of a public key, in that order.
        In legacy mode only the legacy address is returned.

        The SegWit address always commits to the compressed key, the legacy
        address hashes the key bytes as supplied.
    */
    pub fn make_addresses(&self, public_key: &[u8]) -> Result<Vec<Address>, AddressError> {
        let key = PubKey::from_slice(public_key)?;
        let mut addresses = Vec::with_capacity(2);
        if let Some(segwit) = &self.segwit {
            addresses.push(segwit.from_public_key(&key, ScriptType::P2WPKH)?);
        }
        addresses.push(self.legacy.from_public_key(&key, ScriptType::P2PKH)?);
        Ok(addresses)
    }

    pub fn make_address(&self, public_key: &[u8], kind: AddressKind) -> Result<Address, AddressError> {
        let key = PubKey::from_slice(public_key)?;
        match (kind, &self.segwit) {
            (AddressKind::Default, Some(segwit)) => segwit.from_public_key(&key, ScriptType::P2WPKH),
            _ => self.legacy.from_public_key(&key, ScriptType::P2PKH)
        }
    }

    /// True if any of the network's converters accepts the address
    pub fn validate(&self, address: &str) -> bool {
        self.decode(address).is_ok()
    }

    /**
        Decodes an address with whichever converter accepts it.

        When both reject it, the SegWit error is returned for strings starting
        with the network's hrp and separator, the Base58 error otherwise.
        In legacy mode only the Base58 converter is tried.
    */
    pub fn decode(&self, address: &str) -> Result<Address, AddressError> {
        let segwit_err = match self.segwit.as_ref().map(|segwit| segwit.decode(address)) {
            Some(Ok(decoded)) => return Ok(decoded),
            Some(Err(e)) => Some(e),
            None => None
        };
        let legacy_err = match self.legacy.decode(address) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => e
        };

        let err = match (segwit_err, self.params.bech32_hrp) {
            (Some(segwit_err), Some(hrp)) if address.to_lowercase().starts_with(&format!("{}1", hrp)) => segwit_err,
            _ => legacy_err
        };
        debug!("rejected address {:?}: {}", address, err);
        Err(err)
    }

    /**
        Returns the legacy (P2SH) and SegWit (P2WSH) address of the 1-of-2
        multisig script over two public keys, in that order. In legacy mode
        only the P2SH address is returned.

        The result does not depend on the order the keys are passed in.
    */
    pub fn make_1of2_multisig_addresses(&self, first: &[u8], second: &[u8]) -> Result<Vec<Address>, AddressError> {
        let script = MultisigRedeemScript::one_of_two(first, second)
            .map_err(AddressError::MultisigCreation)?;
        self.make_multisig_addresses(&script)
    }

    /// Legacy and, when the network has SegWit, P2WSH addresses of any multisig redeem script
    pub fn make_multisig_addresses(&self, script: &MultisigRedeemScript) -> Result<Vec<Address>, AddressError> {
        debug!(
            "deriving addresses of {}-of-{} multisig script {}",
            script.required(),
            script.keys().len(),
            hex::encode(script.as_bytes())
        );

        let mut addresses = vec![self.legacy.from_script_hash(&script.hash160(), ScriptType::P2SH)?];
        if let Some(segwit) = &self.segwit {
            addresses.push(segwit.from_script_hash(&script.sha256(), ScriptType::P2WSH)?);
        }
        Ok(addresses)
    }
}

impl Default for AddressService {
    fn default() -> Self {
        Self::new(Network::Bitcoin)
    }
}
