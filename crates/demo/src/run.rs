use std::time::Instant;

use shapeyard_engine::{Engine, EngineError, FrameStats, FrameSummary, StepFlow};

use crate::app::ShapesApp;

/// Drive the app until the adapter reports exit, then shut the engine down.
///
/// Between steps the app is idle; inside the callback it is rendering. Exit
/// is terminal: the engine is shut down and the loop cannot restart. The
/// engine is also shut down if a step faults, before the error propagates.
pub fn run(engine: &mut impl Engine, app: &mut ShapesApp) -> Result<FrameSummary, EngineError> {
    let mut stats = FrameStats::default();
    let mut frames: u64 = 0;
    loop {
        let started = Instant::now();
        let flow = match engine.step(&mut |ctx| app.frame(ctx)) {
            Ok(flow) => flow,
            Err(err) => {
                engine.shutdown();
                return Err(err);
            }
        };
        stats.record(started.elapsed());
        frames += 1;
        if flow == StepFlow::Exit {
            break;
        }
    }
    engine.shutdown();
    let summary = stats.summary(frames);
    tracing::info!(%summary, "run complete");
    Ok(summary)
}
