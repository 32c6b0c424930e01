use crate::{Tensor, TypeId};
use dashmap::DashMap;
use dispatchx_core::error::{Error, Result};
use std::sync::Arc;

/// Kernel reachable through the extension table.
pub type OpKernel = Arc<dyn Fn(&[&Tensor]) -> Result<Tensor> + Send + Sync>;

/// Operator table keyed by `(op name, TypeId)`, for operators defined outside the descriptors.
#[derive(Default)]
pub struct OpRegistry {
    kernels: DashMap<(String, TypeId), OpKernel>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self {
            kernels: DashMap::with_capacity(64),
        }
    }

    /// Installs `kernel`, returning the one it replaces.
    pub fn register(&self, op: &str, id: TypeId, kernel: OpKernel) -> Option<OpKernel> {
        self.kernels.insert((op.to_string(), id), kernel)
    }

    pub fn get(&self, op: &str, id: TypeId) -> Option<OpKernel> {
        self.kernels.get(&(op.to_string(), id)).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, op: &str, id: TypeId) -> bool {
        self.kernels.contains_key(&(op.to_string(), id))
    }

    /// Runs `op` for the type of the first argument.
    pub fn call(&self, op: &str, args: &[&Tensor]) -> Result<Tensor> {
        let first = args
            .first()
            .ok_or_else(|| Error::InvalidArgument(format!("{} expects at least one argument", op)))?;
        let id = first.ty().id();

        // clone out of the map so the shard lock is not held while the kernel runs
        let kernel = self.get(op, id).ok_or_else(|| Error::NotImplemented {
            op: op.to_string(),
            type_name: first.ty().name().to_string(),
        })?;
        kernel(args)
    }

    /// Types with a kernel installed for `op`, in id order.
    pub fn ops_for(&self, op: &str) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self
            .kernels
            .iter()
            .filter(|entry| entry.key().0 == op)
            .map(|entry| entry.key().1)
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}
