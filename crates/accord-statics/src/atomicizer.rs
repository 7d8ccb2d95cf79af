//! Delegate-call library that executes a bundle of calls in order.
//!
//! Reached only through a proxy's delegate-call mode: each bundled call is
//! made with the proxy as sender, so one order can move several assets.

use accord_runtime::{CallContext, Contract};
use accord_types::abi::IAtomicizer;
use accord_types::{AccordError, Result};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;

#[derive(Debug, Clone, Default)]
pub struct Atomicizer;

impl Contract for Atomicizer {
    fn name(&self) -> &'static str {
        "Atomicizer"
    }

    fn delegate_call(&self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes> {
        let bundle = IAtomicizer::atomicizeCall::abi_decode(input, true)?;
        if bundle.targets.len() != bundle.calldatas.len() {
            return Err(AccordError::revert(
                ctx.this(),
                format!(
                    "atomicize: {} targets but {} calldatas",
                    bundle.targets.len(),
                    bundle.calldatas.len()
                ),
            ));
        }
        for (index, (target, data)) in bundle.targets.iter().zip(&bundle.calldatas).enumerate() {
            tracing::trace!(index, %target, on_behalf_of = %ctx.this(), "atomicized call");
            ctx.call(*target, data)?;
        }
        Ok(Bytes::new())
    }
}

/// Calldata bundling `calls` into one `atomicize` invocation.
#[must_use]
pub fn atomicize_calldata(calls: &[(Address, Bytes)]) -> Bytes {
    let (targets, calldatas) = calls.iter().cloned().unzip();
    IAtomicizer::atomicizeCall { targets, calldatas }
        .abi_encode()
        .into()
}
