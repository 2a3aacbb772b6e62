/*!
An in-memory, succinct, *dynamic* representation of a bidirected
sequence graph with embedded paths.

# Overview

A variation graph models many genomes at once: nodes carry DNA
sequences, edges join node ends on either strand, and *paths* are
ordered walks through oriented nodes that spell out individual
genomes. This crate provides the mutable core of such a graph:

* [`dyngraph::DynGraph`] is the concrete store, built on dynamic
  indexed vectors so that nodes, edges and paths can be created,
  divided and destroyed without invalidating the public identifiers.
* [`dynvec`] holds those backing vectors.

# The interface

The graph interface is split into three categories, each a trait (or
family of traits) that [`DynGraph`](dyngraph::DynGraph) implements:

* [`handlegraph`] is for immutable access to the nodes and edges of a graph
* [`mutablehandlegraph`] is for mutable access to nodes and edges
* [`pathhandlegraph`] is for both immutable and mutable access to the paths embedded in a graph

# `Handle`s and `NodeId`s

The core types, used all over the various traits, are defined in [`handle`]:

* [`NodeId`](handle::NodeId) is a newtype used as a node identifier
* [`Handle`](handle::Handle) represents a specific orientation of a node
* [`Edge`](handle::Edge) is a newtype for edges in a specific order

Paths and steps are addressed with [`PathId`](pathhandlegraph::PathId)
and [`PathStep`](pathhandlegraph::PathStep).

# Misc.

* [`bridge`] re-exposes the graph operations with integer-shaped
  handles for foreign callers, and holds the save/load entry points
* [`util`] has the reverse-complement helpers
*/

pub mod handle;

pub mod error;

pub mod handlegraph;
pub mod mutablehandlegraph;
pub mod pathhandlegraph;

pub mod dyngraph;
pub mod dynvec;

pub mod bridge;
pub mod util;
