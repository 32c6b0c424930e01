use crate::{cpu::cpu_types, sparse::sparse_cpu_types, OpKernel, OpRegistry, Generator, Tensor, Type, TypeId};
use dispatchx_core::{
    backend::Backend,
    error::{Error, Result},
    scalar_type::ScalarType,
};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, Mutex, MutexGuard},
};

static GLOBAL_CONTEXT: LazyLock<Context> = LazyLock::new(|| {
    let mut context = Context::new();
    if let Err(e) = context.register_all() {
        tracing::error!(error = %e, "failed to register types");
    }
    context
});

/// The process-wide context, populated by [`Context::register_all`] on first use.
pub fn global_context() -> &'static Context {
    &GLOBAL_CONTEXT
}

/// Registry of type descriptors, default generators and extension operators.
pub struct Context {
    types: Vec<Option<Box<dyn Type>>>,
    generators: HashMap<Backend, Mutex<Box<dyn Generator>>>,
    ops: OpRegistry,
}

impl Context {
    /// An empty context. Nothing is registered until [`Context::register_all`] runs.
    pub fn new() -> Self {
        Self {
            types: (0..TypeId::NUM_OPTIONS).map(|_| None).collect(),
            generators: HashMap::new(),
            ops: OpRegistry::new(),
        }
    }

    /// Registers every descriptor this build supports, their default generators and the
    /// builtin extension operators.
    pub fn register_all(&mut self) -> Result<()> {
        for ty in cpu_types().into_iter().chain(sparse_cpu_types()) {
            self.register_type(ty)?;
        }

        for id in TypeId::ALL.iter().copied() {
            if id.backend() == Backend::CPU && self.types[id.index()].is_some() {
                self.register_builtin_ops(id);
            }
        }

        tracing::debug!(
            types = self.types().len(),
            generators = self.generators.len(),
            ops = self.ops.len(),
            "registered all types"
        );
        Ok(())
    }

    fn register_type(&mut self, ty: Box<dyn Type>) -> Result<()> {
        let backend = ty.backend().to_dense();
        if !self.generators.contains_key(&backend) {
            self.generators.insert(backend, Mutex::new(ty.generator()?));
        }

        tracing::debug!(name = ty.name(), id = ty.id().index(), "registered type");
        let index = ty.id().index();
        self.types[index] = Some(ty);
        Ok(())
    }

    fn register_builtin_ops(&self, id: TypeId) {
        let builtins: [(&str, OpKernel); 6] = [
            ("add", Arc::new(|args: &[&Tensor]| expect_args("add", args, 2)?[0].add(args[1]))),
            ("sub", Arc::new(|args: &[&Tensor]| expect_args("sub", args, 2)?[0].sub(args[1]))),
            ("mul", Arc::new(|args: &[&Tensor]| expect_args("mul", args, 2)?[0].mul(args[1]))),
            ("div", Arc::new(|args: &[&Tensor]| expect_args("div", args, 2)?[0].div(args[1]))),
            ("neg", Arc::new(|args: &[&Tensor]| expect_args("neg", args, 1)?[0].neg())),
            ("copy", Arc::new(|args: &[&Tensor]| {
                let src = expect_args("copy", args, 1)?[0];
                src.ty().copy(src)
            })),
        ];
        for (op, kernel) in builtins {
            self.ops.register(op, id, kernel);
        }
    }

    pub fn get_type(&self, backend: Backend, scalar_type: ScalarType) -> Result<&dyn Type> {
        match TypeId::from_parts(backend, scalar_type) {
            Some(id) => self.get_type_by_id(id),
            None => Err(Error::TypeNotEnabled { backend, scalar_type }),
        }
    }

    pub fn get_type_by_id(&self, id: TypeId) -> Result<&dyn Type> {
        self.types[id.index()].as_deref().ok_or(Error::TypeNotEnabled {
            backend: id.backend(),
            scalar_type: id.scalar_type(),
        })
    }

    /// The descriptor in this context with the scalar type of `ty` on `backend`.
    pub fn to_backend(&self, ty: &dyn Type, backend: Backend) -> Result<&dyn Type> {
        self.get_type(backend, ty.scalar_type())
    }

    /// The descriptor in this context with the backend of `ty` and `scalar_type`.
    pub fn to_scalar_type(&self, ty: &dyn Type, scalar_type: ScalarType) -> Result<&dyn Type> {
        self.get_type(ty.backend(), scalar_type)
    }

    /// Registered descriptors in id order.
    pub fn types(&self) -> Vec<&dyn Type> {
        self.types.iter().flatten().map(|ty| ty.as_ref()).collect()
    }

    pub fn has_cuda(&self) -> bool {
        self.types().iter().any(|ty| ty.is_cuda())
    }

    /// Locks the default generator of `backend`; sparse backends share their dense generator.
    pub fn default_generator(&self, backend: Backend) -> Result<MutexGuard<'_, Box<dyn Generator>>> {
        let generator = self
            .generators
            .get(&backend.to_dense())
            .ok_or(Error::BackendUnavailable(backend))?;
        generator.lock().map_err(|_| Error::Lock)
    }

    /// Reseeds every default generator.
    pub fn manual_seed(&self, seed: u64) -> Result<()> {
        for (backend, generator) in &self.generators {
            generator.lock().map_err(|_| Error::Lock)?.manual_seed(seed);
            tracing::debug!(backend = backend.name(), seed, "seeded default generator");
        }
        Ok(())
    }

    pub fn ops(&self) -> &OpRegistry {
        &self.ops
    }

    /// Installs an extension operator for `id`, replacing any previous kernel.
    pub fn register_op(&self, op: &str, id: TypeId, kernel: OpKernel) {
        tracing::debug!(op, id = id.index(), "registered op");
        self.ops.register(op, id, kernel);
    }

    pub fn has_op(&self, op: &str, id: TypeId) -> bool {
        self.ops.contains(op, id)
    }

    pub fn call_op(&self, op: &str, args: &[&Tensor]) -> Result<Tensor> {
        self.ops.call(op, args)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

fn expect_args<'a, 'b>(op: &str, args: &'a [&'b Tensor], count: usize) -> Result<&'a [&'b Tensor]> {
    if args.len() != count {
        return Err(Error::InvalidArgument(format!(
            "{} expects {} arguments, got {}",
            op,
            count,
            args.len()
        )));
    }
    Ok(args)
}
