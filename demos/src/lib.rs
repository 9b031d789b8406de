// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::{fmt, fs, io, path::Path, path::PathBuf, str::FromStr, time::Instant};

use sigstark::{
    crypto::{
        hashers::{Blake3_256, Sha3_256},
        ElementHasher,
    },
    generate_proof,
    math::fields::f64::BaseElement,
    verify, ConfigurationError, Deserializable, DeserializationError, PrivateWitness,
    ProofOptions, ProverError, PublicInputs, Serializable, SignatureAir, StarkProof,
    VerifierError,
};
use structopt::StructOpt;
use tracing::{event, info_span, Level};


// HASH FUNCTIONS
// ================================================================================================

/// Hash functions which can be used to generate and verify proofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFunction {
    Blake3_256,
    Sha3_256,
}

impl FromStr for HashFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blake3_256" | "blake3" => Ok(Self::Blake3_256),
            "sha3_256" | "sha3" => Ok(Self::Sha3_256),
            val => Err(format!("'{val}' is not a valid hash function option")),
        }
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blake3_256 => write!(f, "blake3_256"),
            Self::Sha3_256 => write!(f, "sha3_256"),
        }
    }
}

// DEMO OPTIONS
// ================================================================================================

#[derive(StructOpt, Debug)]
#[structopt(name = "sigstark", about = "Proofs binding a private witness to a signed message")]
pub struct DemoOptions {
    /// Message hash bound by the proof
    #[structopt(short = "m", long = "message", default_value = "123")]
    pub message_hash: u64,

    /// Public key bound by the proof
    #[structopt(short = "k", long = "key", default_value = "456")]
    pub public_key: u64,

    /// Signature bound by the proof
    #[structopt(short = "s", long = "signature", default_value = "789")]
    pub signature: u64,

    /// Private witness values; a valid witness consists of two nonzero values whose sum times
    /// seven is the signature minus the message hash and the public key
    #[structopt(short = "w", long = "witness", default_value = "10,20", use_delimiter = true)]
    pub witness: Vec<u64>,

    /// Number of queries to include in a proof
    #[structopt(short = "q", long = "queries", default_value = "32")]
    pub num_queries: usize,

    /// Blowup factor for low degree extension
    #[structopt(short = "b", long = "blowup", default_value = "8")]
    pub blowup_factor: usize,

    /// Maximum number of FRI folding rounds
    #[structopt(short = "r", long = "rounds", default_value = "4")]
    pub round_budget: usize,

    /// Hash function used in the protocol
    #[structopt(long = "hash", default_value = "blake3_256")]
    pub hash_fn: HashFunction,

    /// Alter the trace commitment of the proof and verify it again
    #[structopt(long = "tamper")]
    pub tamper: bool,

    /// Write the proof to this file as a hex string
    #[structopt(short = "o", long = "out", parse(from_os_str))]
    pub out: Option<PathBuf>,

    /// Verify the hex-encoded proof in this file instead of generating a new one
    #[structopt(short = "p", long = "proof", parse(from_os_str))]
    pub proof: Option<PathBuf>,
}

impl DemoOptions {
    pub fn to_proof_options(&self) -> Result<ProofOptions, ConfigurationError> {
        ProofOptions::new(self.num_queries, self.blowup_factor, self.round_budget)
    }

    pub fn public_inputs(&self) -> PublicInputs {
        PublicInputs::new(
            BaseElement::new(self.message_hash),
            BaseElement::new(self.public_key),
            BaseElement::new(self.signature),
        )
    }

    pub fn private_witness(&self) -> PrivateWitness {
        PrivateWitness::new(self.witness.iter().copied().map(BaseElement::new).collect())
    }
}

// DEMO ERROR
// ================================================================================================

/// Reasons a demo run can fail before the proof is verified.
#[derive(Debug)]
pub enum DemoError {
    InvalidOptions(ConfigurationError),
    ProofGenerationFailed(ProverError),
    MalformedProof(DeserializationError),
    InvalidHex(hex::FromHexError),
    Io(io::Error),
}

impl fmt::Display for DemoError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOptions(err) => write!(f, "invalid proof options: {err}"),
            Self::ProofGenerationFailed(err) => write!(f, "failed to generate proof: {err}"),
            Self::MalformedProof(err) => write!(f, "failed to read proof: {err}"),
            Self::InvalidHex(err) => write!(f, "proof file is not valid hex: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DemoError {}

impl From<ConfigurationError> for DemoError {
    fn from(err: ConfigurationError) -> Self {
        Self::InvalidOptions(err)
    }
}

impl From<ProverError> for DemoError {
    fn from(err: ProverError) -> Self {
        Self::ProofGenerationFailed(err)
    }
}

impl From<DeserializationError> for DemoError {
    fn from(err: DeserializationError) -> Self {
        Self::MalformedProof(err)
    }
}

impl From<hex::FromHexError> for DemoError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidHex(err)
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

// DEMO RUNNER
// ================================================================================================

/// Result of a demo run.
#[derive(Debug)]
pub struct Outcome {
    /// Serialized proof.
    pub proof_bytes: Vec<u8>,
    /// Result of verifying the proof.
    pub verification: Result<(), VerifierError>,
    /// Result of verifying the proof with an altered trace commitment, if requested.
    pub tampered_verification: Option<Result<(), VerifierError>>,
}

/// Generates (or reads) a proof according to `options` and verifies it.
pub fn run(options: &DemoOptions) -> Result<Outcome, DemoError> {
    match options.hash_fn {
        HashFunction::Blake3_256 => run_with::<Blake3_256<BaseElement>>(options),
        HashFunction::Sha3_256 => run_with::<Sha3_256<BaseElement>>(options),
    }
}

fn run_with<H>(options: &DemoOptions) -> Result<Outcome, DemoError>
where
    H: ElementHasher<BaseField = BaseElement>,
{
    let proof_options = options.to_proof_options()?;
    let pub_inputs = options.public_inputs();

    let proof: StarkProof<BaseElement, H> = match &options.proof {
        Some(path) => {
            let proof = read_proof(path)?;
            event!(Level::INFO, path = %path.display(), "read proof");
            proof
        },
        None => {
            let now = Instant::now();
            let witness = options.private_witness();
            let proof = generate_proof::<H>(&pub_inputs, &witness, proof_options)?;
            event!(
                Level::INFO,
                elapsed_ms = now.elapsed().as_millis() as u64,
                hash_fn = %options.hash_fn,
                "generated proof"
            );
            proof
        },
    };

    let proof_bytes = proof.to_bytes();
    event!(
        Level::INFO,
        size_bytes = proof_bytes.len(),
        num_fri_layers = proof.num_fri_layers(),
        "proof size"
    );
    if let Some(path) = &options.out {
        write_proof(path, &proof_bytes)?;
        event!(Level::INFO, path = %path.display(), "wrote proof");
    }

    let tampered = match options.tamper {
        true => Some(tamper_trace_commitment::<H>(&proof_bytes)?),
        false => None,
    };

    let now = Instant::now();
    let verification = info_span!("verify_proof")
        .in_scope(|| verify::<SignatureAir, H>(proof, pub_inputs, &proof_options));
    match &verification {
        Ok(()) => {
            event!(Level::INFO, elapsed_ms = now.elapsed().as_millis() as u64, "proof verified")
        },
        Err(err) => event!(Level::INFO, %err, "proof rejected"),
    }

    let tampered_verification = tampered.map(|proof| {
        let result = info_span!("verify_tampered_proof")
            .in_scope(|| verify::<SignatureAir, H>(proof, pub_inputs, &proof_options));
        match &result {
            Ok(()) => event!(Level::WARN, "tampered proof verified"),
            Err(err) => event!(Level::INFO, %err, "tampered proof rejected"),
        }
        result
    });

    Ok(Outcome { proof_bytes, verification, tampered_verification })
}

// HELPER FUNCTIONS
// ================================================================================================

/// Writes `proof_bytes` into the file at `path` as a hex string.
pub fn write_proof(path: &Path, proof_bytes: &[u8]) -> Result<(), DemoError> {
    fs::write(path, hex::encode(proof_bytes))?;
    Ok(())
}

/// Reads a proof from a file at `path` containing a hex string.
pub fn read_proof<H>(path: &Path) -> Result<StarkProof<BaseElement, H>, DemoError>
where
    H: ElementHasher<BaseField = BaseElement>,
{
    let contents = fs::read_to_string(path)?;
    let bytes = hex::decode(contents.trim())?;
    Ok(StarkProof::from_bytes(&bytes)?)
}

/// Decodes `proof_bytes` into a proof and increments the first byte of its trace commitment.
fn tamper_trace_commitment<H>(proof_bytes: &[u8]) -> Result<StarkProof<BaseElement, H>, DemoError>
where
    H: ElementHasher<BaseField = BaseElement>,
{
    let mut proof = StarkProof::<BaseElement, H>::from_bytes(proof_bytes)?;
    let mut bytes = proof.trace_commitment.to_bytes();
    bytes[0] = bytes[0].wrapping_add(1);
    proof.trace_commitment = H::Digest::read_from_bytes(&bytes)?;
    Ok(proof)
}
