//! Early validation of declared initializer steps.
//!
//! Responsibilities:
//! - Apply the environment file and overrides, then confirm every declared
//!   step has a handler, without running any of them.
//!
//! Does NOT handle:
//! - Verifying that handler commands succeed.
//!
//! Invariants:
//! - Fails on the first step without a handler, matching `run`.

use anyhow::Result;
use roadie_config::{HandlerRegistry, InitializerRun, handler_name};

use crate::config_context::NamespaceContext;

pub fn run(ctx: &NamespaceContext, handlers: &[String]) -> Result<()> {
    let mut registry = HandlerRegistry::new();
    for step in handlers {
        registry.register(step.as_str(), |_| Ok(()));
    }

    let mut store = ctx.namespace().config();
    let mut run = InitializerRun::new(&mut store, &mut registry);
    run.prepare_with(|cfg| ctx.apply_overrides(cfg))?;
    let steps = run.store().initializers()?;
    drop(run);

    registry.validate(&steps)?;

    for step in &steps {
        println!("ok  {step} ({})", handler_name(step));
    }
    println!("{} initializer step(s) have handlers", steps.len());
    Ok(())
}
