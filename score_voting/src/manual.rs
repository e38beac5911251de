/*!

This is the long-form manual for `score_voting` and `votemap`.

## Input format

One tab-separated file per year, named after the year (`2016.tsv` or
`2016.csv`, tab delimited either way). The first row is the header. It must
contain exactly one `Contestant` column, may contain a `Total score` column
(both matched case-insensitively), and every other column names a voter:

```text
Contestant	Alba	Borland	Corsica	Total score
Aria	4	6	1	11
Dorian	7	-	2	9
```

Cells are blank, `-`, or a non-negative integer. Blank and `-` both count as
a score of 0. The first blank row ends the data section; anything below it
(footnotes, sources) is ignored.

Column sets do not have to agree between years. A voter only present in some
years is averaged over the years in which it actually cast a retained vote.

## Options

- `min_vote` (default 0): the minimum score for an individual vote to be
  retained. Votes below the floor are dropped entirely.
- `limit` (unset by default): how many contestants to report per voter, best
  first.
- `minimum_average` (default 0): the minimum average score for a
  (voter, contestant) pair to be reported. With the default of 0, pairs whose
  total is 0 are left out.

Options can be given on the command line or in a JSON configuration file
(`--config`); command line flags win. File paths in the configuration resolve
relative to the configuration file.

```json
{
    "dataDirectory": "data",
    "minVote": 1,
    "limit": 5,
    "minimumAverage": 6.0,
    "title": "Grand final televote"
}
```

## Report formats

- `text` (default): one line per voter with the averaged scores of its top
  contestants and the number of participations.
- `json`: the resolved options plus one object per summary row. This is the
  format used by `--reference` to compare a run against a stored summary.
- `dot`: a Graphviz digraph with one weighted edge per summary row. Pipe it
  through `dot -Tsvg` to obtain the voting-behaviour diagram.

*/
