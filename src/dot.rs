/*!
EGraph visualization with [GraphViz]

Use the [`Dot`] struct to visualize an [`EGraph`].

[GraphViz]: https://graphviz.gitlab.io/
!*/

use std::ffi::OsStr;
use std::fmt::{self, Display, Formatter};
use std::io::{Error, ErrorKind, Result, Write};
use std::path::Path;

use crate::EGraph;

/** A wrapper for an [`EGraph`] that can output [GraphViz] for
visualization.

```no_run
use saturate::EGraph;

let mut egraph = EGraph::default();
let x = egraph.add_term("x");
let zero = egraph.add_term("0");
let add = egraph.add_operation("+", [x, zero]);
egraph.unite(add, x);
egraph.restore_invariants();

// Dot implements std::fmt::Display
println!("my egraph dot file: {}", egraph.dot());

// create a Dot and compile it assuming `dot` is on the system
egraph.dot().to_svg("target/foo.svg").unwrap();
egraph.dot().to_png("target/foo.png").unwrap();
```

Note that self-edges (from a term to its containing class) will be
rendered improperly due to a deficiency in GraphViz, drawn as an edge
from the term to itself instead of to its own class.

[GraphViz]: https://graphviz.gitlab.io/
**/
pub struct Dot<'a> {
    egraph: &'a EGraph,
}

impl<'a> Dot<'a> {
    /// Given a reference to an [`EGraph`], makes a `Dot`. See also the
    /// more convenient [`EGraph::dot`].
    pub fn new(egraph: &EGraph) -> Dot<'_> {
        Dot { egraph }
    }

    /// Writes the `Dot` to a .dot file with the given filename.
    /// Does _not_ require a `dot` binary.
    pub fn to_dot(&self, filename: impl AsRef<Path>) -> Result<()> {
        let mut file = std::fs::File::create(filename)?;
        write!(file, "{}", self)?;
        Ok(())
    }

    /// Renders the `Dot` to a .png file with the given filename.
    /// Requires a `dot` binary to be on your `$PATH`.
    pub fn to_png(&self, filename: impl AsRef<Path>) -> Result<()> {
        self.run_dot(["-Tpng".as_ref(), "-o".as_ref(), filename.as_ref()])
    }

    /// Renders the `Dot` to a .svg file with the given filename.
    /// Requires a `dot` binary to be on your `$PATH`.
    pub fn to_svg(&self, filename: impl AsRef<Path>) -> Result<()> {
        self.run_dot(["-Tsvg".as_ref(), "-o".as_ref(), filename.as_ref()])
    }

    /// Invokes `dot` with the given arguments, piping this formatted
    /// `Dot` into stdin.
    pub fn run_dot<S, I>(&self, args: I) -> Result<()>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = S>,
    {
        use std::process::{Command, Stdio};
        let mut child = Command::new("dot")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()?;
        let stdin = child.stdin.as_mut().expect("failed to open stdin");
        write!(stdin, "{}", self)?;
        match child.wait()?.code() {
            Some(0) => Ok(()),
            Some(e) => Err(Error::new(
                ErrorKind::Other,
                format!("dot program returned error code {}", e),
            )),
            None => Err(Error::new(
                ErrorKind::Other,
                "dot program was killed by a signal",
            )),
        }
    }
}

impl<'a> Display for Dot<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "digraph egraph {{")?;

        // set compound=true to enable edges to clusters
        writeln!(f, "  compound=true")?;
        writeln!(f, "  clusterrank=local")?;

        // define all the nodes, clustered by eclass
        for class in self.egraph.classes() {
            writeln!(f, "  subgraph cluster_{} {{", class.id())?;
            writeln!(f, "    style=dotted")?;
            for (i, leaf) in class.iter().enumerate() {
                writeln!(
                    f,
                    "    \"{}.{}\"[label = \"{}\"]",
                    class.id(),
                    i,
                    self.egraph.term(leaf)
                )?;
            }
            writeln!(f, "  }}")?;
        }

        for class in self.egraph.classes() {
            for (i_in_class, leaf) in class.iter().enumerate() {
                let term = self.egraph.term(leaf);
                for (arg_i, &child) in term.children.iter().enumerate() {
                    // write the edge to the child, but clip it to the
                    // class with lhead
                    let child_leader = self.egraph.find(child);

                    if child_leader == class.id() {
                        writeln!(
                            f,
                            "  \"{}.{}\" -> \"{}.{}\":n [lhead = cluster_{}, label = {}]",
                            class.id(),
                            i_in_class,
                            class.id(),
                            i_in_class,
                            class.id(),
                            arg_i
                        )?;
                    } else {
                        // {}.0 to pick an arbitrary node in the cluster
                        writeln!(
                            f,
                            "  \"{}.{}\" -> \"{}.0\" [lhead = cluster_{}, label = {}]",
                            class.id(),
                            i_in_class,
                            child_leader,
                            child_leader,
                            arg_i
                        )?;
                    }
                }
            }
        }

        write!(f, "}}")
    }
}
