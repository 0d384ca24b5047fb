use tokio_util::sync::CancellationToken;

use crate::animation::synergy::SynergyAnimation;
use crate::animation::text::TextPainter;
use crate::animation::Animate;
use crate::animation::Animation;
use crate::canvas::FrameCanvas;
use crate::display::Panel;
use crate::playlist::Icons;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Every animation ran to completion.
    Exhausted,
    Cancelled,
}

/// Runs `animations` in order until the last one completes or `cancellation`
/// is triggered.
///
/// Cancellation is only looked at after a frame was swapped onto the panel, so
/// the panel always ends up showing a complete frame. The writable canvas is
/// handed back to the caller for the next pass.
pub async fn run_pass<A, P>(
    animations: &mut [A],
    panel: &mut P,
    mut canvas: FrameCanvas,
    cancellation: &CancellationToken,
) -> Result<(FrameCanvas, PassOutcome), crate::error::Error>
where
    A: Animate,
    P: Panel,
{
    let size = panel.size();
    let mut animations = animations.iter_mut().enumerate();

    let Some((mut idx, mut current)) = animations.next() else {
        tracing::debug!("Nothing to play");
        return Ok((canvas, PassOutcome::Exhausted));
    };
    current.initialize(size);

    loop {
        canvas.blank();
        let complete = current.render(&mut canvas);
        canvas = panel.swap_on_vsync(canvas)?;

        if cancellation.is_cancelled() {
            tracing::info!(animation = idx, "Render loop cancelled");
            return Ok((canvas, PassOutcome::Cancelled));
        }

        if complete {
            tracing::debug!(animation = idx, "Animation complete");
            let Some((next_idx, next)) = animations.next() else {
                return Ok((canvas, PassOutcome::Exhausted));
            };
            idx = next_idx;
            current = next;
            current.initialize(size);
        }

        tokio::time::sleep(current.sleep()).await;
    }
}

/// What every pass plays: the logo, then one animation per line of the message
/// file.
pub struct Program<'a> {
    pub synergy: &'a mut SynergyAnimation,
    pub messages: &'a camino::Utf8Path,
    pub icons: Icons<'a>,
    pub painter: &'a dyn TextPainter,
    pub frame_sleep: std::time::Duration,
}

/// Plays pass after pass until `cancellation` is triggered, re-reading the
/// message file before each pass.
///
/// The panel is blanked before returning, also if a pass failed.
pub async fn run<P: Panel>(
    mut program: Program<'_>,
    panel: &mut P,
    cancellation: &CancellationToken,
) -> Result<(), crate::error::Error> {
    let played = play(&mut program, panel, cancellation).await;
    let blanked = panel.blank();
    tracing::info!("Display blanked");
    played.and(blanked)
}

async fn play<P: Panel>(
    program: &mut Program<'_>,
    panel: &mut P,
    cancellation: &CancellationToken,
) -> Result<(), crate::error::Error> {
    let mut canvas = panel.create_frame_canvas();
    let mut pass: u64 = 0;

    while !cancellation.is_cancelled() {
        pass += 1;
        let lines = crate::playlist::read_messages(program.messages).await?;
        tracing::info!(pass, messages = lines.len(), "Starting pass");

        let mut animations = vec![Animation::Synergy(&mut *program.synergy)];
        animations.extend(crate::playlist::build(
            lines,
            program.icons,
            program.painter,
            program.frame_sleep,
        ));
        tracing::debug!(?animations, "Built playlist");

        let (next_canvas, outcome) = run_pass(&mut animations, panel, canvas, cancellation).await?;
        canvas = next_canvas;

        if outcome == PassOutcome::Cancelled {
            break;
        }
        tracing::debug!(pass, "Pass finished");
    }

    Ok(())
}
