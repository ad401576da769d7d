// Static files written into the student repository, and the one-shot LaTeX
// examples the model is asked to imitate.

/// Scheme `listings` setup shared by homework and exam documents.
macro_rules! scheme_listing_style {
    () => {
        r#"% --- SCHEME LISTING STYLE START ---
\definecolor{keywordblue}{rgb}{0.0, 0.0, 0.6}
\definecolor{commentgreen}{rgb}{0.0, 0.4, 0.0}

\lstdefinelanguage{Scheme}{
  morekeywords={define,lambda,if,cond,else,let,let*,letrec,begin,quote,car,cdr,
    cons,list,apply,eval,define-syntax,syntax-rules,delay,and,or,case,do,set!},
  sensitive=true,
  morecomment=[l]{;},
  morestring=[b]"
}

\lstdefinestyle{scheme}{
  language=Scheme,
  basicstyle=\ttfamily,
  keywordstyle=\color{keywordblue}\bfseries,
  commentstyle=\color{commentgreen}\itshape,
  showstringspaces=false,
  breaklines=true,
  frame=none,
  numbers=none,
  xleftmargin=2em,
  tabsize=2
}

\lstset{style=scheme}
% --- SCHEME LISTING STYLE END ---
"#
    };
}

/// One-shot homework example: fixes packages, header and listings style.
pub const HOMEWORK_EXAMPLE: &str = concat!(
    r#"\documentclass{article}
\usepackage{amsmath}
\usepackage{listings}
\usepackage{geometry}
\geometry{a4paper, margin=1in}
\usepackage{xcolor}

"#,
    scheme_listing_style!(),
    r#"
\title{Course Assignment}
\author{}
\date{}

\begin{document}
\maketitle

\section*{Instructions}
Please solve the following problems using Scheme.

\section*{Problem 1: Linear Recursion (10 points)}
Write a Scheme procedure \texttt{(factorial n)} that computes $n!$ using a linear recursive process.

\begin{lstlisting}
(define (factorial n)
  (if (= n 0)
      1
      (* n (factorial (- n 1)))))
\end{lstlisting}

\section*{Problem 2: Box and Pointer (5 points)}
Draw the box-and-pointer diagram for the list \texttt{(list 1 2 3)}.
\vspace{3cm} % Space for student drawing

\end{document}
"#
);

/// One-shot exam example.
pub const EXAM_EXAMPLE: &str = concat!(
    r#"\documentclass{article}
\usepackage{amsmath}
\usepackage{listings}
\usepackage{geometry}
\geometry{a4paper, margin=1in}
\usepackage{enumitem}
\usepackage{xcolor}

"#,
    scheme_listing_style!(),
    r#"
\begin{document}

\begin{center}
    \Large{\textbf{Course: Structure and Interpretation of Computer Programs}} \\
    \large{\textbf{Final Examination}} \\
    \normalsize{\textbf{Semester: Spring 2024}}
\end{center}

\vspace{1cm}

\textbf{Instructions:} Please read each question carefully.

\hrulefill

\section*{Question 1 (Short Answer) [5 pts]}
Explain the concept of a "black-box abstraction".

\textbf{Answer:}
\vspace{3cm}

\hrulefill

\section*{Question 2 (Coding) [10 pts]}
Implement a Scheme function \texttt{is-prime?}.

\begin{lstlisting}
(define (is-prime? n)
  ; Implement the primality test here.
)
\end{lstlisting}

\textbf{Answer:}
\vspace{6cm}

\hrulefill

\end{document}
"#
);

/// CI workflow: runs the Guile test of every homework week touched by a push or PR.
pub const VERIFY_WORKFLOW: &str = r#"name: Verify Homework
on: [push, pull_request]

jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
        with:
          fetch-depth: 0 # Fetch full history to allow diffing
      - name: Install Guile (Scheme)
        run: |
          sudo apt-get update
          sudo apt-get install -y guile-3.0
      - name: Run Tests (Submitted Week Only)
        run: |
          # 1. Identify changed files
          if [ "${{ github.event_name }}" == "pull_request" ]; then
            CHANGED_FILES=$(git diff --name-only origin/${{ github.base_ref }} HEAD)
          else
            if git rev-parse HEAD^ >/dev/null 2>&1; then
              CHANGED_FILES=$(git diff --name-only HEAD^ HEAD)
            else
              CHANGED_FILES=$(git ls-tree -r HEAD --name-only)
            fi
          fi

          echo "Modified files:"
          echo "$CHANGED_FILES"

          # 2. Unique modified homework directories (homework/week_01/...)
          CHANGED_WEEKS=$(echo "$CHANGED_FILES" | grep -o "homework/week_[0-9]*" | sort -u)

          if [ -z "$CHANGED_WEEKS" ]; then
            echo "No homework files modified. Skipping autograder."
            exit 0
          fi

          # 3. Run tests for modified weeks
          FAILED=0
          for week_dir in $CHANGED_WEEKS; do
            TEST_FILE=$(find "$week_dir" -name "test_*.scm" | head -n 1)

            if [ -f "$TEST_FILE" ]; then
              echo "----------------------------------------"
              echo "Testing Submission: $week_dir"
              echo "Running $TEST_FILE..."

              if ! (cd "$week_dir" && guile --no-auto-compile "$(basename "$TEST_FILE")"); then
                echo "FAILED: $TEST_FILE"
                FAILED=1
              else
                echo "PASSED: $TEST_FILE"
              fi
            else
              echo "Warning: No test file found in $week_dir"
            fi
          done

          exit $FAILED
"#;

/// Student-facing README placed at the repository root.
pub const STUDENT_README: &str = r#"# Course Homework Repository

Welcome to your course homework repository. This repository contains all your weekly assignments, verifying tests, and exam materials.

## Prerequisites

You need **Guile Scheme** installed to run the code and tests.
- **Mac (Homebrew):** `brew install guile`
- **Ubuntu/Debian:** `sudo apt-get install guile-3.0`
- **Windows:** Use WSL (Ubuntu) or a Guile installer.

## How to Submit Homework

1. **Navigate** to the current week's folder (e.g., `homework/week_01/`).
2. **Open** the solution file (e.g., `solution_week_1.scm`). It contains placeholder definitions.
3. **Implement** your solution in Scheme.
4. **Test Locally** from inside the week's folder:
   ```bash
   guile test_week_1.scm
   ```
   * If it prints `PASS`, you are good!
   * If it prints `FAIL`, check your logic.
5. **Submit** by pushing your changes to GitHub:
   ```bash
   git add .
   git commit -m "Solved Week 1"
   git push origin main
   ```
6. **Verify** on GitHub. Go to the "Actions" tab in your repository to see if the autograder passed.

## Structure

* `homework/`: Weekly assignments.
    * `assignment.tex`: The problem set (compile with LaTeX).
    * `solution_week_N.scm`: **EDIT THIS FILE**.
    * `test_week_N.scm`: The verification script.
* `exams/`: Midterm and Final Exam sources.
"#;

/// Placeholder solution so the week's tests can load something.
pub fn solution_stub(week: u32) -> String {
    format!("; Student solution for Week {week}\n\n(define (solve) #t)\n")
}
