//! Terminal display surface

use tokio::sync::watch;

use crate::state::DisplaySnapshot;

/// Print every display change to stdout
pub async fn display_task(mut snapshots: watch::Receiver<DisplaySnapshot>) {
    loop {
        {
            let snapshot = snapshots.borrow_and_update();
            println!("{}  |  {}", snapshot.primary, snapshot.secondary);
        }
        if snapshots.changed().await.is_err() {
            break;
        }
    }
}
