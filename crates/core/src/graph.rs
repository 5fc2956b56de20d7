// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dataset graph: an ordered pipeline of stages plus the cursor the
//! scheduler advances as each stage finishes. This is the structure a
//! user's driver callback builds through the [`Job`] handle, and the
//! structure the scheduler drains task-by-task at runtime.

use crate::dataset::{Dataset, DatasetKind, InputRef};
use crate::error::{GraphError, GraphResult};
use crate::ids::{DatasetId, TaskId, WorkerId};

#[derive(Debug, Default)]
pub struct DatasetGraph {
    datasets: Vec<Dataset>,
    cursor: usize,
}

impl DatasetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, dataset: Dataset) -> DatasetId {
        let id = DatasetId::new(self.datasets.len());
        self.datasets.push(dataset);
        id
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn get(&self, id: DatasetId) -> GraphResult<&Dataset> {
        self.datasets.get(id.index()).ok_or(GraphError::NoSuchDataset(id))
    }

    pub fn get_mut(&mut self, id: DatasetId) -> GraphResult<&mut Dataset> {
        self.datasets
            .get_mut(id.index())
            .ok_or(GraphError::NoSuchDataset(id))
    }

    /// The dataset currently being scheduled, if the run is not finished.
    pub fn current(&self) -> Option<DatasetId> {
        (self.cursor < self.datasets.len()).then(|| DatasetId::new(self.cursor))
    }

    /// True once every dataset has reached DONE and there is nothing left
    /// to schedule.
    pub fn is_done(&self) -> bool {
        self.cursor >= self.datasets.len()
    }

    /// Resolve the per-task input URL lists for `id`, either from external
    /// files or from the upstream dataset's partitioned outputs.
    fn resolve_inputs(&self, id: DatasetId) -> GraphResult<Vec<Vec<String>>> {
        let ds = self.get(id)?;
        match &ds.input {
            InputRef::Files(files) => {
                if files.len() != ds.ntasks {
                    return Err(GraphError::TaskCountMismatch {
                        dataset: id,
                        ntasks: ds.ntasks,
                        ninputs: files.len(),
                    });
                }
                Ok(files.iter().map(|f| vec![f.clone()]).collect())
            }
            InputRef::Upstream(upstream_id) => {
                let upstream = self.get(*upstream_id)?;
                if !upstream.is_ready() {
                    return Err(GraphError::UpstreamNotReady(*upstream_id));
                }
                Ok((0..ds.ntasks).map(|part| upstream.partition_outputs(part)).collect())
            }
        }
    }

    /// Build `id`'s task vector if it hasn't been already. Called by the
    /// scheduler right before it starts handing out this dataset's tasks.
    pub fn ensure_materialized(&mut self, id: DatasetId) -> GraphResult<()> {
        if self.get(id)?.is_materialized() {
            return Ok(());
        }
        let inurls = self.resolve_inputs(id)?;
        self.get_mut(id)?.materialize(inurls);
        Ok(())
    }

    /// Advance the cursor past every dataset that has already finished.
    /// This is the stage barrier: the cursor never skips over a dataset
    /// that still has TODO or ACTIVE tasks.
    pub fn advance(&mut self) {
        while self.cursor < self.datasets.len() && self.datasets[self.cursor].is_ready() {
            self.cursor += 1;
        }
    }

    /// Pop one TODO task from the current dataset for `worker`, if any.
    pub fn pop_todo_from_current(&mut self, worker: WorkerId) -> Option<(DatasetId, TaskId)> {
        let id = self.current()?;
        let ds = self.datasets.get_mut(id.index())?;
        ds.pop_todo(worker).map(|task| (id, task))
    }

    pub fn complete(&mut self, dataset: DatasetId, task: TaskId, worker: WorkerId, outputs: Vec<String>) -> GraphResult<bool> {
        Ok(self.get_mut(dataset)?.complete(task, worker, outputs))
    }

    pub fn requeue(&mut self, dataset: DatasetId, task: TaskId) -> GraphResult<()> {
        self.get_mut(dataset)?.requeue(task);
        Ok(())
    }
}

/// Handle passed to a user's driver callback to declare the pipeline.
/// Each call appends one stage to the underlying [`DatasetGraph`].
pub struct Job<'a> {
    graph: &'a mut DatasetGraph,
}

impl<'a> Job<'a> {
    pub fn new(graph: &'a mut DatasetGraph) -> Self {
        Self { graph }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn map_data(
        &mut self,
        input: InputRef,
        map_name: impl Into<String>,
        partition_name: impl Into<String>,
        ntasks: usize,
        nparts: usize,
        outdir: impl Into<String>,
    ) -> DatasetId {
        let dataset = Dataset::new(
            DatasetKind::Map,
            input,
            map_name,
            partition_name,
            ntasks,
            nparts,
            outdir,
            "mtxt",
        );
        self.graph.push(dataset)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reduce_data(
        &mut self,
        input: DatasetId,
        reduce_name: impl Into<String>,
        partition_name: impl Into<String>,
        ntasks: usize,
        nparts: usize,
        outdir: impl Into<String>,
    ) -> DatasetId {
        let dataset = Dataset::new(
            DatasetKind::Reduce,
            InputRef::Upstream(input),
            reduce_name,
            partition_name,
            ntasks,
            nparts,
            outdir,
            "rtxt",
        );
        self.graph.push(dataset)
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
