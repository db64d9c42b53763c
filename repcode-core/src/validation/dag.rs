//! Dependency graph over circuit operations
//!
//! Edges encode the happens-before relation that any downstream scheduler
//! must preserve: operations on the same qubit keep insertion order, a
//! conditioned operation follows the measurements it reads, and barriers
//! fence every qubit. Operations with no path between them may run in the
//! same logical step.

use crate::{Circuit, ClbitId, OperationKind, QuantumError, Result};
use std::collections::BTreeSet;

/// Node in the dependency graph (one circuit operation)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OperationNode {
    pub operation_index: usize,
    pub kind: OperationKind,
    pub qubits: Vec<usize>,
}

/// Edge in the dependency graph
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DependencyEdge {
    /// Both operations act on `qubit`
    QubitOrder { from: usize, to: usize, qubit: usize },
    /// `to` reads the classical bit written by `from`
    ClassicalOrder { from: usize, to: usize, clbit: usize },
    /// One endpoint is a barrier
    Fence { from: usize, to: usize },
}

impl DependencyEdge {
    pub fn from(&self) -> usize {
        match self {
            DependencyEdge::QubitOrder { from, .. }
            | DependencyEdge::ClassicalOrder { from, .. }
            | DependencyEdge::Fence { from, .. } => *from,
        }
    }

    pub fn to(&self) -> usize {
        match self {
            DependencyEdge::QubitOrder { to, .. }
            | DependencyEdge::ClassicalOrder { to, .. }
            | DependencyEdge::Fence { to, .. } => *to,
        }
    }
}

/// A classical read with no earlier measurement of that bit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnresolvedRead {
    pub operation_index: usize,
    pub clbit: ClbitId,
}

/// Dependency graph representation
#[derive(Debug)]
pub struct DependencyGraph {
    nodes: Vec<OperationNode>,
    edges: Vec<DependencyEdge>,
    outgoing_edges: Vec<Vec<usize>>,
    incoming_edges: Vec<Vec<usize>>,
    unresolved_reads: Vec<UnresolvedRead>,
}

impl DependencyGraph {
    /// Create dependency graph from circuit
    pub fn from_circuit(circuit: &Circuit) -> Result<Self> {
        let num_ops = circuit.len();
        let mut nodes = Vec::with_capacity(num_ops);
        let mut edges = Vec::with_capacity(num_ops * 2);
        let mut unresolved_reads = Vec::new();

        let mut qubit_last_use: Vec<Option<usize>> = vec![None; circuit.num_qubits()];
        let mut clbit_writer: Vec<Option<usize>> = vec![None; circuit.num_clbits()];

        for (i, op) in circuit.operations().enumerate() {
            let qubits: Vec<usize> = op.qubits().iter().map(|q| q.index()).collect();

            if op.is_barrier() {
                let preds: BTreeSet<usize> = qubit_last_use.iter().flatten().copied().collect();
                for from in preds {
                    edges.push(DependencyEdge::Fence { from, to: i });
                }
                qubit_last_use.iter_mut().for_each(|slot| *slot = Some(i));
            } else {
                for &qubit in &qubits {
                    let slot = qubit_last_use.get_mut(qubit).ok_or_else(|| {
                        QuantumError::invalid_qubit(qubit, circuit.num_qubits())
                    })?;
                    if let Some(from) = *slot {
                        let fenced = nodes
                            .get(from)
                            .map(|n: &OperationNode| n.kind == OperationKind::Barrier)
                            .unwrap_or(false);
                        edges.push(if fenced {
                            DependencyEdge::Fence { from, to: i }
                        } else {
                            DependencyEdge::QubitOrder { from, to: i, qubit }
                        });
                    }
                    *slot = Some(i);
                }
            }

            for &clbit in op.clbits_read() {
                match clbit_writer.get(clbit.index()).copied().flatten() {
                    Some(from) => edges.push(DependencyEdge::ClassicalOrder {
                        from,
                        to: i,
                        clbit: clbit.index(),
                    }),
                    None => unresolved_reads.push(UnresolvedRead {
                        operation_index: i,
                        clbit,
                    }),
                }
            }
            if let Some(clbit) = op.clbit_written() {
                if let Some(slot) = clbit_writer.get_mut(clbit.index()) {
                    *slot = Some(i);
                }
            }

            nodes.push(OperationNode {
                operation_index: i,
                kind: op.kind(),
                qubits,
            });
        }

        // Fence edges from a barrier to both qubits of a two-qubit op repeat.
        edges.dedup();

        let num_nodes = nodes.len();
        let mut outgoing_edges = vec![Vec::new(); num_nodes];
        let mut incoming_edges = vec![Vec::new(); num_nodes];
        for (edge_idx, edge) in edges.iter().enumerate() {
            let (from, to) = (edge.from(), edge.to());
            if from >= num_nodes || to >= num_nodes {
                return Err(QuantumError::ValidationError(format!(
                    "Invalid edge in dependency graph: from={}, to={}, num_nodes={}",
                    from, to, num_nodes
                )));
            }
            outgoing_edges[from].push(edge_idx);
            incoming_edges[to].push(edge_idx);
        }

        Ok(Self {
            nodes,
            edges,
            outgoing_edges,
            incoming_edges,
            unresolved_reads,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn get_node(&self, index: usize) -> Option<&OperationNode> {
        self.nodes.get(index)
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn outgoing_edges(&self, node_index: usize) -> &[usize] {
        self.outgoing_edges
            .get(node_index)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn incoming_edges(&self, node_index: usize) -> &[usize] {
        self.incoming_edges
            .get(node_index)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Classical reads that no earlier measurement resolves
    pub fn unresolved_reads(&self) -> &[UnresolvedRead] {
        &self.unresolved_reads
    }

    /// Whether `to` transitively depends on `from`
    pub fn happens_before(&self, from: usize, to: usize) -> bool {
        if from >= to || to >= self.num_nodes() {
            return false;
        }
        let mut stack = vec![from];
        let mut seen = vec![false; self.num_nodes()];
        while let Some(node) = stack.pop() {
            for &edge_idx in self.outgoing_edges(node) {
                let next = self.edges[edge_idx].to();
                if next == to {
                    return true;
                }
                if next < to && !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        false
    }

    pub fn is_acyclic(&self) -> bool {
        self.topological_sort().is_ok()
    }

    /// Compute topological ordering (Kahn's algorithm)
    pub fn topological_sort(&self) -> Result<Vec<usize>> {
        let mut in_degree: Vec<usize> = (0..self.num_nodes())
            .map(|i| self.incoming_edges(i).len())
            .collect();

        let mut queue: Vec<usize> = (0..self.num_nodes())
            .rev()
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut result = Vec::with_capacity(self.num_nodes());

        while let Some(node) = queue.pop() {
            result.push(node);
            for &edge_idx in self.outgoing_edges(node) {
                let to = self.edges[edge_idx].to();
                in_degree[to] -= 1;
                if in_degree[to] == 0 {
                    queue.push(to);
                }
            }
        }

        if result.len() != self.num_nodes() {
            return Err(QuantumError::ValidationError(format!(
                "Circuit contains cycles, cannot compute topological order. Processed {} of {} nodes",
                result.len(),
                self.num_nodes()
            )));
        }
        Ok(result)
    }

    /// Logical step of every node
    ///
    /// Barriers take no step of their own: a barrier sits at the step after
    /// everything it fences, and so does whatever follows it.
    fn levels(&self) -> Result<Vec<usize>> {
        let order = self.topological_sort()?;
        let mut level = vec![0usize; self.num_nodes()];
        for &node in &order {
            for &edge_idx in self.incoming_edges(node) {
                let from = self.edges[edge_idx].from();
                let weight = usize::from(self.nodes[from].kind != OperationKind::Barrier);
                level[node] = level[node].max(level[from] + weight);
            }
        }
        Ok(level)
    }

    /// Compute parallel execution layers (barriers excluded)
    pub fn compute_parallel_layers(&self) -> Result<Vec<Vec<usize>>> {
        let level = self.levels()?;
        let mut layers: Vec<Vec<usize>> = Vec::new();
        for node in self.nodes.iter().filter(|n| n.kind != OperationKind::Barrier) {
            let l = level[node.operation_index];
            if layers.len() <= l {
                layers.resize_with(l + 1, Vec::new);
            }
            layers[l].push(node.operation_index);
        }
        layers.retain(|layer| !layer.is_empty());
        Ok(layers)
    }

    /// Number of logical steps, barriers excluded
    pub fn gate_depth(&self) -> Result<usize> {
        Ok(self.compute_parallel_layers()?.len())
    }

    /// Analyze parallelism
    pub fn analyze_parallelism(&self) -> Result<ParallelismAnalysis> {
        let layers = self.compute_parallel_layers()?;
        let total_operations: usize = layers.iter().map(Vec::len).sum();
        let depth = layers.len();
        let parallelism_factor = if depth > 0 {
            total_operations as f64 / depth as f64
        } else {
            1.0
        };
        let max_parallelism = layers.iter().map(Vec::len).max().unwrap_or(0);

        Ok(ParallelismAnalysis {
            layers,
            parallelism_factor,
            max_parallelism,
        })
    }
}

/// Analysis of circuit parallelism
#[derive(Clone, Debug)]
pub struct ParallelismAnalysis {
    /// Operation indices that may execute in the same step
    pub layers: Vec<Vec<usize>>,
    /// Average operations per step
    pub parallelism_factor: f64,
    pub max_parallelism: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Condition, Operation, QubitId, SynthesisConfig};

    fn q(i: usize) -> QubitId {
        QubitId::new(i)
    }

    #[test]
    fn test_empty_graph() {
        let circuit = Circuit::new(&SynthesisConfig::velocity());
        let dag = DependencyGraph::from_circuit(&circuit).unwrap();
        assert_eq!(dag.num_nodes(), 0);
        assert_eq!(dag.gate_depth().unwrap(), 0);
    }

    #[test]
    fn test_disjoint_qubits_share_a_layer() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity());
        for i in 0..3 {
            circuit.push(Operation::Delay { qubit: q(i), duration: 10 }).unwrap();
        }
        let dag = DependencyGraph::from_circuit(&circuit).unwrap();
        assert_eq!(dag.num_edges(), 0);
        assert_eq!(dag.compute_parallel_layers().unwrap(), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_same_qubit_is_ordered() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity());
        circuit.push(Operation::Init { qubit: q(0) }).unwrap();
        circuit.push(Operation::Encode { control: q(0), target: q(1) }).unwrap();
        circuit.push(Operation::Encode { control: q(0), target: q(2) }).unwrap();
        let dag = DependencyGraph::from_circuit(&circuit).unwrap();
        assert!(dag.happens_before(0, 2));
        assert_eq!(dag.gate_depth().unwrap(), 3);
    }

    #[test]
    fn test_barrier_fences_all_qubits() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity());
        circuit.push(Operation::Init { qubit: q(0) }).unwrap();
        circuit.push(Operation::barrier("INIT")).unwrap();
        circuit.push(Operation::Init { qubit: q(4) }).unwrap();
        let dag = DependencyGraph::from_circuit(&circuit).unwrap();
        assert!(dag.happens_before(0, 2));
        assert_eq!(dag.compute_parallel_layers().unwrap(), vec![vec![0], vec![2]]);
    }

    #[test]
    fn test_classical_edges() {
        let mut circuit = Circuit::new(&SynthesisConfig::velocity());
        let syn = circuit.syndrome().clone();
        circuit
            .push(Operation::Measure { qubit: q(3), clbit: syn.bit(0).unwrap() })
            .unwrap();
        circuit
            .push(Operation::ConditionalFlip {
                qubit: q(0),
                condition: Condition::new("syn", syn.bits(), 1),
            })
            .unwrap();
        let dag = DependencyGraph::from_circuit(&circuit).unwrap();
        assert!(dag.happens_before(0, 1));
        assert_eq!(dag.unresolved_reads().len(), 1);
        assert_eq!(dag.unresolved_reads()[0].clbit, syn.bit(1).unwrap());
    }
}
