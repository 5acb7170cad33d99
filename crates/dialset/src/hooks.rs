//! Override hook registry
//!
//! Edition-specific behavior (for example a tenant's custom logo) is injected
//! by registering an implementation under a well-known [`OverrideHandle`] at
//! process start. The core never links against the implementing code: a lookup
//! of an unregistered handle simply yields the caller's default.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::prelude::*;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Override implementation: takes its arguments by value, resolves to a result
pub type HookFunction<A, T> = Arc<dyn Fn(A) -> BoxFuture<'static, DsResult<T>> + Send + Sync>;

/// Identifies an overridable capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideHandle {
	pub module_path: &'static str,
	pub function_name: &'static str,
}

impl OverrideHandle {
	pub const fn new(module_path: &'static str, function_name: &'static str) -> Self {
		Self { module_path, function_name }
	}
}

impl fmt::Display for OverrideHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{}", self.module_path, self.function_name)
	}
}

/// Persisted file name of a tenant's custom logo: `(Option<TnId>) -> Option<String>`
pub const LOGO_FILENAME: OverrideHandle =
	OverrideHandle::new("enterprise_settings::store", "get_logo_filename");

/// Persisted file name of a tenant's custom logotype: `(Option<TnId>) -> Option<String>`
pub const LOGOTYPE_FILENAME: OverrideHandle =
	OverrideHandle::new("enterprise_settings::store", "get_logotype_filename");

struct HookEntry {
	func: Box<dyn Any + Send + Sync>,
	signature: &'static str,
}

type HookMap = HashMap<OverrideHandle, HookEntry>;

/// Mutable registry used during startup
#[derive(Default)]
pub struct HookRegistry {
	hooks: HookMap,
}

impl HookRegistry {
	pub fn new() -> Self {
		Self { hooks: HashMap::new() }
	}

	/// Register an implementation. Each handle accepts at most one.
	pub fn register<A, T>(&mut self, handle: OverrideHandle, func: HookFunction<A, T>) -> DsResult<()>
	where
		A: 'static,
		T: 'static,
	{
		if self.hooks.contains_key(&handle) {
			return Err(Error::ConfigError(format!("Override '{}' is already registered", handle)));
		}

		debug!("Registering override: {}", handle);
		self.hooks.insert(
			handle,
			HookEntry { func: Box::new(func), signature: std::any::type_name::<HookFunction<A, T>>() },
		);
		Ok(())
	}

	/// Register a plain async closure
	pub fn register_fn<A, T, F, Fut>(&mut self, handle: OverrideHandle, f: F) -> DsResult<()>
	where
		A: 'static,
		T: 'static,
		F: Fn(A) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = DsResult<T>> + Send + 'static,
	{
		let func: HookFunction<A, T> = Arc::new(move |args| Box::pin(f(args)));
		self.register(handle, func)
	}

	pub fn len(&self) -> usize {
		self.hooks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.hooks.is_empty()
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenHookRegistry {
		info!("Freezing override registry with {} hooks", self.hooks.len());
		FrozenHookRegistry { hooks: self.hooks }
	}
}

/// Immutable registry shared by all resolvers
#[derive(Default)]
pub struct FrozenHookRegistry {
	hooks: HookMap,
}

impl fmt::Debug for FrozenHookRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FrozenHookRegistry")
			.field("hooks", &self.hooks.keys().map(ToString::to_string).collect::<Vec<_>>())
			.finish()
	}
}

impl FrozenHookRegistry {
	/// Registry with nothing installed (open edition)
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_installed(&self, handle: OverrideHandle) -> bool {
		self.hooks.contains_key(&handle)
	}

	/// Look up an implementation. `None` if unregistered or registered with
	/// a different signature.
	pub fn get<A, T>(&self, handle: OverrideHandle) -> Option<&HookFunction<A, T>>
	where
		A: 'static,
		T: 'static,
	{
		let entry = self.hooks.get(&handle)?;
		let func = entry.func.downcast_ref::<HookFunction<A, T>>();
		if func.is_none() {
			warn!(
				"Override '{}' has signature {}, expected {}",
				handle,
				entry.signature,
				std::any::type_name::<HookFunction<A, T>>()
			);
		}
		func
	}

	/// Run the override if installed, otherwise return `default`.
	///
	/// A failing override also yields `default`; its result is only used when
	/// it runs to completion.
	pub async fn try_invoke<A, T>(&self, handle: OverrideHandle, args: A, default: T) -> T
	where
		A: Send + 'static,
		T: Send + 'static,
	{
		let Some(func) = self.get::<A, T>(handle) else {
			debug!("Override '{}' not installed, using default", handle);
			return default;
		};

		match func(args).await {
			Ok(value) => value,
			Err(err) => {
				warn!("Override '{}' failed: {}, using default", handle, err);
				default
			}
		}
	}
}


// vim: ts=4
